//! # Pad Controller
//!
//! One poll-driven view of up to eight physical controllers' combined
//! state. The controller owns a single snapshot that the backend mutates
//! in place once per explicit [`update`](PadController::update); since
//! the backend shifts current buttons into previous on every refresh,
//! press/release classification is a pure bitwise operation over the
//! two masks.
//!
//! # Example
//!
//! ```
//! use npad::hid::{SimFrame, SimulatedHid};
//! use npad::pad::{NpadButton, PadController};
//!
//! let sim = SimulatedHid::with_script([
//!     SimFrame::with_buttons(NpadButton::A.bits()),
//! ]);
//! let mut pad = PadController::new(sim)?;
//!
//! pad.update();
//! assert!(pad.is_pressed(NpadButton::A));
//!
//! pad.update();
//! assert!(pad.is_held(NpadButton::A));
//! assert!(!pad.is_pressed(NpadButton::A));
//! # Ok::<(), npad::error::NpadError>(())
//! ```

use tracing::{debug, warn};

use crate::error::{NpadError, Result};
use crate::hid::HidBackend;
use crate::pad::{AnalogStickState, NpadButton, NpadIdType, NpadStyleSet, PadState, PAD_STATE_SIZE};

/// Ids a pad listens to when none are given: player 1 plus handheld.
pub const DEFAULT_IDS: [NpadIdType; 2] = [NpadIdType::No1, NpadIdType::Handheld];

/// Player count used when configuration is left implicit.
const DEFAULT_MAX_PLAYERS: u8 = 1;

/// Negotiate player count and accepted controller styles.
///
/// Process-wide, one-time: call before any [`PadController`] exists.
/// Constructing a controller without calling this first implicitly
/// negotiates one player with the [`STANDARD`](NpadStyleSet::STANDARD)
/// styles. Calling again after the first negotiation is unsupported by
/// the native layer; the call is still forwarded, with a warning, and
/// the resulting behavior is whatever the native layer does.
///
/// `max_players` must be between 1 and 8.
pub fn configure_input<H: HidBackend>(backend: &mut H, max_players: u8, styles: NpadStyleSet) {
    if backend.is_configured() {
        warn!(
            max_players,
            ?styles,
            "input already configured; re-negotiation behavior is owned by the native layer"
        );
    }
    debug!(max_players, ?styles, "configuring input");
    backend.configure_input(max_players, styles);
}

/// Poll-driven controller state with press/release detection.
///
/// Call [`update()`](Self::update) once per frame to refresh the
/// snapshot, then query buttons, sticks, and triggers.
///
/// # Thread Safety
///
/// `PadController` assumes single-threaded frame-loop usage. Concurrent
/// `update()`/reads from multiple threads need external synchronization.
pub struct PadController<H: HidBackend> {
    backend: H,
    state: PadState,
}

impl<H: HidBackend> PadController<H> {
    /// Open a pad listening to the default ids ([`DEFAULT_IDS`]).
    ///
    /// # Errors
    ///
    /// Same as [`with_ids`](Self::with_ids).
    pub fn new(backend: H) -> Result<Self> {
        Self::with_ids(backend, &DEFAULT_IDS)
    }

    /// Open a pad listening to the given logical ids.
    ///
    /// Checks run in a fixed order: the id set is validated before any
    /// backend call; the backend's reported snapshot size is checked
    /// against this crate's layout; input is implicitly negotiated with
    /// defaults if nothing configured it yet; only then is the snapshot
    /// initialized.
    ///
    /// # Errors
    ///
    /// - [`NpadError::InvalidArgument`]: `ids` is empty
    /// - [`NpadError::ConfigurationMismatch`]: the backend's snapshot
    ///   layout differs from [`PAD_STATE_SIZE`] — a platform/version
    ///   mismatch that must abort, not be retried
    pub fn with_ids(mut backend: H, ids: &[NpadIdType]) -> Result<Self> {
        if ids.is_empty() {
            return Err(NpadError::InvalidArgument(
                "id set must not be empty".to_string(),
            ));
        }

        let reported = backend.state_size();
        if reported != PAD_STATE_SIZE {
            return Err(NpadError::ConfigurationMismatch {
                expected: PAD_STATE_SIZE,
                actual: reported,
            });
        }

        if !backend.is_configured() {
            debug!("input not configured, negotiating defaults");
            backend.configure_input(DEFAULT_MAX_PLAYERS, NpadStyleSet::STANDARD);
        }

        let mask = id_mask(ids);
        let mut state = PadState::default();
        backend.initialize_with_mask(&mut state, mask);
        debug!("pad initialized with id mask {:#x}", mask);

        Ok(Self { backend, state })
    }

    /// Read the current controller state.
    ///
    /// Must be called once per frame for press/release detection to
    /// work; calling faster than the hardware polling rate simply
    /// yields repeated identical snapshots, never an error.
    pub fn update(&mut self) {
        self.backend.update(&mut self.state);
    }

    /// Buttons currently held down.
    pub fn buttons(&self) -> NpadButton {
        NpadButton::from_bits_retain(self.state.buttons_cur)
    }

    /// Buttons newly pressed since the last update (rising edge).
    pub fn buttons_down(&self) -> NpadButton {
        NpadButton::from_bits_retain(self.state.buttons_cur & !self.state.buttons_old)
    }

    /// Buttons newly released since the last update (falling edge).
    pub fn buttons_up(&self) -> NpadButton {
        NpadButton::from_bits_retain(self.state.buttons_old & !self.state.buttons_cur)
    }

    /// Returns `true` if any of the given buttons is currently held.
    pub fn is_held(&self, buttons: NpadButton) -> bool {
        self.buttons().intersects(buttons)
    }

    /// Returns `true` if any of the given buttons was just pressed this
    /// frame. (Down now, was not down last frame.)
    pub fn is_pressed(&self, buttons: NpadButton) -> bool {
        self.buttons_down().intersects(buttons)
    }

    /// Returns `true` if any of the given buttons was just released
    /// this frame. (Not down now, was down last frame.)
    pub fn is_released(&self, buttons: NpadButton) -> bool {
        self.buttons_up().intersects(buttons)
    }

    /// Left analog stick reading.
    pub fn left_stick(&self) -> AnalogStickState {
        self.state.sticks[0]
    }

    /// Right analog stick reading.
    pub fn right_stick(&self) -> AnalogStickState {
        self.state.sticks[1]
    }

    /// Left GameCube analog trigger.
    pub fn gc_trigger_l(&self) -> u32 {
        self.state.gc_triggers[0]
    }

    /// Right GameCube analog trigger.
    pub fn gc_trigger_r(&self) -> u32 {
        self.state.gc_triggers[1]
    }

    /// Style set negotiated for the active controller.
    pub fn style_set(&self) -> NpadStyleSet {
        self.state.styles()
    }

    /// Device attribute bits from the current snapshot.
    pub fn attributes(&self) -> u32 {
        self.state.attributes
    }

    /// Whether the given logical id is currently connected. Absence is
    /// ordinary state, not an error.
    pub fn is_connected(&self, id: NpadIdType) -> bool {
        self.state.is_connected(id)
    }

    /// Whether the console is currently in handheld mode.
    pub fn is_handheld(&self) -> bool {
        self.state.is_handheld()
    }

    /// Access the raw current snapshot.
    pub fn state(&self) -> &PadState {
        &self.state
    }
}

/// OR of `1 << id` over the requested logical ids.
fn id_mask(ids: &[NpadIdType]) -> u64 {
    ids.iter().fold(0, |mask, id| mask | id.mask_bit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hid::backend::MockHidBackend;
    use crate::hid::{SimFrame, SimulatedHid};

    fn pad_with_script(frames: &[u64]) -> PadController<SimulatedHid> {
        let sim = SimulatedHid::with_script(
            frames.iter().map(|&buttons| SimFrame::with_buttons(buttons)),
        );
        PadController::new(sim).expect("construction with default ids")
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_empty_id_set_rejected_before_any_native_call() {
        let mut spy = MockHidBackend::new();
        spy.expect_state_size().times(0);
        spy.expect_is_configured().times(0);
        spy.expect_configure_input().times(0);
        spy.expect_initialize_with_mask().times(0);
        spy.expect_update().times(0);

        let err = PadController::with_ids(spy, &[]).unwrap_err();
        assert!(matches!(err, NpadError::InvalidArgument(_)));
    }

    #[test]
    fn test_state_size_mismatch_is_fatal() {
        let mut spy = MockHidBackend::new();
        spy.expect_state_size().times(1).return_const(40usize);
        spy.expect_is_configured().times(0);
        spy.expect_configure_input().times(0);
        spy.expect_initialize_with_mask().times(0);

        let err = PadController::new(spy).unwrap_err();
        match err {
            NpadError::ConfigurationMismatch { expected, actual } => {
                assert_eq!(expected, PAD_STATE_SIZE);
                assert_eq!(actual, 40);
            }
            other => panic!("expected ConfigurationMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_unconfigured_backend_gets_default_negotiation() {
        let mut spy = MockHidBackend::new();
        spy.expect_state_size().return_const(PAD_STATE_SIZE);
        spy.expect_is_configured().return_const(false);
        spy.expect_configure_input()
            .withf(|&max_players, &styles| max_players == 1 && styles == NpadStyleSet::STANDARD)
            .times(1)
            .return_const(());
        spy.expect_initialize_with_mask()
            .times(1)
            .return_const(());

        PadController::new(spy).unwrap();
    }

    #[test]
    fn test_configured_backend_is_not_reconfigured() {
        let mut spy = MockHidBackend::new();
        spy.expect_state_size().return_const(PAD_STATE_SIZE);
        spy.expect_is_configured().return_const(true);
        spy.expect_configure_input().times(0);
        spy.expect_initialize_with_mask().times(1).return_const(());

        PadController::new(spy).unwrap();
    }

    #[test]
    fn test_default_ids_mask() {
        let mut spy = MockHidBackend::new();
        spy.expect_state_size().return_const(PAD_STATE_SIZE);
        spy.expect_is_configured().return_const(true);
        spy.expect_initialize_with_mask()
            .withf(|_, &mask| mask == (1 << 0) | (1 << 0x20))
            .times(1)
            .return_const(());

        PadController::new(spy).unwrap();
    }

    #[test]
    fn test_custom_ids_mask() {
        let mut spy = MockHidBackend::new();
        spy.expect_state_size().return_const(PAD_STATE_SIZE);
        spy.expect_is_configured().return_const(true);
        spy.expect_initialize_with_mask()
            .withf(|_, &mask| mask == (1 << 1) | (1 << 3) | (1 << 0x10))
            .times(1)
            .return_const(());

        PadController::with_ids(
            spy,
            &[NpadIdType::No2, NpadIdType::No4, NpadIdType::Other],
        )
        .unwrap();
    }

    #[test]
    fn test_duplicate_ids_collapse_in_mask() {
        let mut spy = MockHidBackend::new();
        spy.expect_state_size().return_const(PAD_STATE_SIZE);
        spy.expect_is_configured().return_const(true);
        spy.expect_initialize_with_mask()
            .withf(|_, &mask| mask == 1)
            .times(1)
            .return_const(());

        PadController::with_ids(spy, &[NpadIdType::No1, NpadIdType::No1]).unwrap();
    }

    // ==================== Explicit Configuration Tests ====================

    #[test]
    fn test_explicit_configure_forwards_arguments() {
        let mut spy = MockHidBackend::new();
        spy.expect_is_configured().return_const(false);
        spy.expect_configure_input()
            .withf(|&max_players, &styles| {
                max_players == 2 && styles == (NpadStyleSet::STANDARD | NpadStyleSet::GC)
            })
            .times(1)
            .return_const(());

        configure_input(&mut spy, 2, NpadStyleSet::STANDARD | NpadStyleSet::GC);
    }

    #[test]
    fn test_repeat_configure_still_forwards() {
        // Misuse per the native contract, but the call goes through
        let mut sim = SimulatedHid::new();
        configure_input(&mut sim, 1, NpadStyleSet::STANDARD);
        configure_input(&mut sim, 4, NpadStyleSet::FULL_KEY);
        assert_eq!(sim.configured(), Some((4, NpadStyleSet::FULL_KEY)));
    }

    #[test]
    fn test_explicit_configure_suppresses_implicit_default() {
        let mut sim = SimulatedHid::new();
        configure_input(&mut sim, 8, NpadStyleSet::FULL_CTRL);
        let pad = PadController::new(sim).unwrap();
        // The implicit (1, STANDARD) default must not have replaced it
        assert_eq!(pad.style_set(), NpadStyleSet::FULL_CTRL);
    }

    // ==================== Edge Detection Tests ====================

    #[test]
    fn test_edge_masks_follow_the_bitwise_definition() {
        let mut pad = pad_with_script(&[0b1010, 0b0110]);

        pad.update();
        pad.update();
        let cur = pad.state().buttons_cur;
        let old = pad.state().buttons_old;
        assert_eq!(pad.buttons_down().bits(), cur & !old);
        assert_eq!(pad.buttons_up().bits(), old & !cur);
        assert_eq!(pad.buttons_down().bits(), 0b0100);
        assert_eq!(pad.buttons_up().bits(), 0b1000);
    }

    #[test]
    fn test_down_and_up_never_overlap() {
        let script = [0x0, 0x1, 0xff, 0x81, 0x0, 0x8000_0000_0001];
        let mut pad = pad_with_script(&script);
        for _ in 0..script.len() {
            pad.update();
            assert_eq!(pad.buttons_down() & pad.buttons_up(), NpadButton::empty());
        }
    }

    #[test]
    fn test_scripted_edge_sequence() {
        // Raw snapshots and the edges they must produce, first frame
        // seeding the history explicitly
        let mut pad = pad_with_script(&[0x0, 0x1, 0x1, 0x3, 0x0]);

        let expected_down = [0x0, 0x1, 0x0, 0x2, 0x0];
        let expected_up = [0x0, 0x0, 0x0, 0x0, 0x3];
        for (i, (&down, &up)) in expected_down.iter().zip(&expected_up).enumerate() {
            pad.update();
            assert_eq!(pad.buttons_down().bits(), down, "down mask at frame {i}");
            assert_eq!(pad.buttons_up().bits(), up, "up mask at frame {i}");
        }
    }

    #[test]
    fn test_unchanged_hardware_state_is_idempotent() {
        let mut pad = pad_with_script(&[0x5]);

        pad.update();
        assert_eq!(pad.buttons_down().bits(), 0x5);

        // Script exhausted: the world stopped changing
        for _ in 0..3 {
            pad.update();
            assert_eq!(pad.buttons(), NpadButton::from_bits_retain(0x5));
            assert!(pad.buttons_down().is_empty());
            assert!(pad.buttons_up().is_empty());
        }
    }

    #[test]
    fn test_held_pressed_released_predicates() {
        let a = NpadButton::A.bits();
        let mut pad = pad_with_script(&[a, a, 0x0]);

        pad.update();
        assert!(pad.is_pressed(NpadButton::A));
        assert!(pad.is_held(NpadButton::A));
        assert!(!pad.is_released(NpadButton::A));

        pad.update();
        assert!(!pad.is_pressed(NpadButton::A));
        assert!(pad.is_held(NpadButton::A));

        pad.update();
        assert!(pad.is_released(NpadButton::A));
        assert!(!pad.is_held(NpadButton::A));
        assert!(!pad.is_pressed(NpadButton::B));
    }

    #[test]
    fn test_predicates_match_any_of_the_given_buttons() {
        let mut pad = pad_with_script(&[NpadButton::STICK_L_LEFT.bits()]);
        pad.update();
        // Stick deflection counts as a directional press via the composite
        assert!(pad.is_pressed(NpadButton::ANY_LEFT));
        assert!(!pad.is_pressed(NpadButton::ANY_RIGHT));
    }

    // ==================== Snapshot Read Tests ====================

    #[test]
    fn test_stick_and_trigger_reads() {
        let frame = SimFrame {
            buttons: 0,
            sticks: [
                AnalogStickState { x: 100, y: -200 },
                AnalogStickState { x: 0, y: 7 },
            ],
            gc_triggers: [3, 90],
        };
        let sim = SimulatedHid::with_script([frame]);
        let mut pad = PadController::new(sim).unwrap();
        pad.update();

        assert_eq!(pad.left_stick(), AnalogStickState { x: 100, y: -200 });
        assert_eq!(pad.right_stick(), AnalogStickState { x: 0, y: 7 });
        assert_eq!(pad.gc_trigger_l(), 3);
        assert_eq!(pad.gc_trigger_r(), 90);
    }

    #[test]
    fn test_connectivity_comes_from_the_snapshot() {
        let sim = SimulatedHid::new();
        let pad = PadController::new(sim).unwrap();
        assert!(pad.is_connected(NpadIdType::No1));
        assert!(pad.is_connected(NpadIdType::Handheld));
        assert!(pad.is_handheld());
        assert!(!pad.is_connected(NpadIdType::No2));
    }

    #[test]
    fn test_raw_state_access() {
        let sim = SimulatedHid::new();
        let mut pad = PadController::new(sim).unwrap();
        pad.update();
        assert_eq!(pad.state().id_mask, 1);
        assert_eq!(pad.state().read_handheld, 1);
        assert_eq!(pad.attributes(), 1);
    }
}
