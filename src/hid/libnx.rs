//! # Native Pad Backend
//!
//! Thin unsafe wrapper over the platform pad library. Only compiled
//! with the `libnx` feature, since it links against symbols that exist
//! solely on the console toolchain. The size probe is exported by the
//! hosting runtime's shim alongside the pad functions.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::hid::HidBackend;
use crate::pad::{NpadStyleSet, PadState};

// One-shot flag: input negotiation is process-wide in the native layer.
static INPUT_CONFIGURED: AtomicBool = AtomicBool::new(false);

extern "C" {
    fn padConfigureInput(max_players: u32, style_set: u32);
    fn padInitializeWithMask(state: *mut PadState, mask: u64);
    fn padUpdate(state: *mut PadState);
    fn extensionPadStateSize() -> u32;
}

/// Handle to the real native pad library.
///
/// Zero-sized: the state it fronts is process-global, including the
/// configured-once flag.
#[derive(Debug, Default)]
pub struct LibnxHid;

impl LibnxHid {
    pub fn new() -> Self {
        Self
    }
}

impl HidBackend for LibnxHid {
    fn configure_input(&mut self, max_players: u8, styles: NpadStyleSet) {
        INPUT_CONFIGURED.store(true, Ordering::SeqCst);
        unsafe { padConfigureInput(u32::from(max_players), styles.bits()) }
    }

    fn is_configured(&self) -> bool {
        INPUT_CONFIGURED.load(Ordering::SeqCst)
    }

    fn state_size(&self) -> usize {
        unsafe { extensionPadStateSize() as usize }
    }

    fn initialize_with_mask(&mut self, state: &mut PadState, mask: u64) {
        unsafe { padInitializeWithMask(state, mask) }
    }

    fn update(&mut self, state: &mut PadState) {
        unsafe { padUpdate(state) }
    }
}
