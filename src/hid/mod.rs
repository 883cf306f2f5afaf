//! # Native HID Seam
//!
//! The four native pad operations behind a trait so the controller can
//! run against the real platform library, a scripted simulation, or a
//! test double.

pub mod backend;
#[cfg(feature = "libnx")]
pub mod libnx;
pub mod sim;

pub use backend::HidBackend;
#[cfg(feature = "libnx")]
pub use libnx::LibnxHid;
pub use sim::{SimFrame, SimulatedHid};
