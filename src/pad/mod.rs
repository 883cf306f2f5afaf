//! # Pad Module
//!
//! Poll-driven controller input with edge detection.
//!
//! This module handles:
//! - Logical controller ids and style-set negotiation
//! - The fixed-ABI pad snapshot shared with the native layer
//! - Per-frame polling via [`PadController::update`]
//! - Held / pressed-this-frame / released-this-frame classification

pub mod buttons;
pub mod controller;
pub mod state;
pub mod style;

pub use buttons::NpadButton;
pub use controller::{configure_input, PadController, DEFAULT_IDS};
pub use state::{AnalogStickState, PadState, PAD_STATE_SIZE};
pub use style::{NpadIdType, NpadStyleSet};
