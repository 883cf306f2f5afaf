//! # Pad Snapshot Layout
//!
//! [`PadState`] is the fixed binary layout shared with the native pad
//! library: the native update call writes it in place, shifting the
//! current button mask into the previous one as it does. The field
//! order and widths are dictated by the platform ABI and checked both
//! at compile time (size pin below) and at runtime against
//! [`HidBackend::state_size`](crate::hid::HidBackend::state_size).

use crate::pad::{NpadButton, NpadIdType, NpadStyleSet};

/// Analog stick reading. Both axes are signed, centered on zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalogStickState {
    pub x: i32,
    pub y: i32,
}

/// One point-in-time read of the combined controller state.
///
/// Layout is byte-for-byte the native struct: four one-byte masks and
/// flags, three u32 fields (the third is explicit reserved padding),
/// the current and previous 64-bit button masks, two stick records,
/// and two GameCube analog trigger values. Everything is naturally
/// aligned, so `repr(C)` yields the exact packed size.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct PadState {
    /// Logical ids this pad was initialized to listen to (players 1-8)
    pub id_mask: u8,
    /// Logical ids currently connected
    pub active_id_mask: u8,
    /// Whether handheld-mode state is read by this pad
    pub read_handheld: u8,
    /// Whether handheld mode is currently active
    pub active_handheld: u8,
    /// Negotiated style set of the active controller
    pub style_set: u32,
    /// Device attribute bits reported by the native layer
    pub attributes: u32,
    /// Reserved, keeps the button masks 8-byte aligned
    pub padding: u32,
    /// Buttons held in this snapshot
    pub buttons_cur: u64,
    /// Buttons held in the previous snapshot
    pub buttons_old: u64,
    /// Left (index 0) and right (index 1) analog sticks
    pub sticks: [AnalogStickState; 2],
    /// GameCube-style analog triggers, left and right
    pub gc_triggers: [u32; 2],
}

/// Size of the snapshot layout this crate was written against.
pub const PAD_STATE_SIZE: usize = core::mem::size_of::<PadState>();

// ABI pin: 4 + 3*4 + 2*8 + 2*8 + 2*4 bytes.
const _: () = assert!(PAD_STATE_SIZE == 56);

impl PadState {
    /// Negotiated style set of whatever controller is active.
    pub fn styles(&self) -> NpadStyleSet {
        NpadStyleSet::from_bits_retain(self.style_set)
    }

    /// Buttons held in this snapshot.
    pub fn buttons(&self) -> NpadButton {
        NpadButton::from_bits_retain(self.buttons_cur)
    }

    /// Whether the given logical id is currently connected.
    ///
    /// Disconnection is ordinary state, not an error: a pad with no
    /// controller attached simply reports unset bits here. The `Other`
    /// slot has no dedicated byte in the snapshot and always reads as
    /// not connected.
    pub fn is_connected(&self, id: NpadIdType) -> bool {
        match id {
            NpadIdType::Handheld => self.active_handheld != 0,
            NpadIdType::Other => false,
            player => self.active_id_mask & (1 << (player as u8)) != 0,
        }
    }

    /// Whether the console is currently in handheld mode.
    pub fn is_handheld(&self) -> bool {
        self.active_handheld != 0
    }
}
