//! # npad Library
//!
//! Poll Nintendo Switch controllers with frame-accurate press/release detection.
//!
//! This library wraps the native pad interface behind a [`hid::HidBackend`]
//! seam and derives edge-triggered button transitions from consecutive
//! snapshots, one explicit [`pad::PadController::update`] per frame.

pub mod config;
pub mod error;
pub mod hid;
pub mod pad;
pub mod trace;
