//! Trait abstraction for the native pad operations to enable testing

use crate::pad::{NpadStyleSet, PadState};

/// The native HID operations a [`PadController`](crate::pad::PadController)
/// depends on and does not implement.
///
/// Implementations do the actual state bookkeeping: in particular,
/// [`update`](Self::update) must shift the snapshot's current button
/// mask into the previous one before writing fresh state, so edge
/// detection needs no history outside the snapshot itself.
#[cfg_attr(test, mockall::automock)]
pub trait HidBackend {
    /// Process-wide negotiation of player count and accepted styles.
    ///
    /// The native layer supports this once; repeat calls are forwarded
    /// as-is and whatever then happens is the native layer's business.
    fn configure_input(&mut self, max_players: u8, styles: NpadStyleSet);

    /// Whether [`configure_input`](Self::configure_input) already ran.
    ///
    /// For the real platform library this is process state; simulated
    /// and mock backends track it per instance.
    fn is_configured(&self) -> bool;

    /// Snapshot size in bytes of the layout the native library was
    /// built with. Used solely for the construction-time ABI check.
    fn state_size(&self) -> usize;

    /// Populate a fresh snapshot for the logical ids in `mask`.
    fn initialize_with_mask(&mut self, state: &mut PadState, mask: u64);

    /// Refresh `state` in place with current hardware state.
    fn update(&mut self, state: &mut PadState);
}
