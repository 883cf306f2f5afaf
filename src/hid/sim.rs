//! # Simulated HID Backend
//!
//! A scriptable in-process stand-in for the native pad library. Frames
//! are consumed one per [`update`](crate::hid::HidBackend::update); once
//! the script runs dry the last frame repeats, which is exactly how real
//! hardware looks to a caller polling faster than anything changes.

use std::collections::VecDeque;

use crate::hid::HidBackend;
use crate::pad::{AnalogStickState, NpadIdType, NpadStyleSet, PadState, PAD_STATE_SIZE};

/// One scripted snapshot's worth of raw input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimFrame {
    /// Raw button mask for this frame
    pub buttons: u64,
    /// Left (0) and right (1) stick readings
    pub sticks: [AnalogStickState; 2],
    /// GameCube analog triggers, left and right
    pub gc_triggers: [u32; 2],
}

impl SimFrame {
    /// Frame with the given buttons held, sticks centered.
    pub fn with_buttons(buttons: u64) -> Self {
        Self {
            buttons,
            ..Self::default()
        }
    }
}

/// Scriptable pad backend.
///
/// The reported state size defaults to the real layout size and can be
/// overridden to exercise the construction-time ABI check.
#[derive(Debug)]
pub struct SimulatedHid {
    script: VecDeque<SimFrame>,
    last: SimFrame,
    configured: Option<(u8, NpadStyleSet)>,
    reported_size: usize,
}

impl SimulatedHid {
    /// Backend with an empty script; every update reads as all-idle.
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            last: SimFrame::default(),
            configured: None,
            reported_size: PAD_STATE_SIZE,
        }
    }

    /// Backend pre-loaded with a frame script.
    pub fn with_script<I: IntoIterator<Item = SimFrame>>(frames: I) -> Self {
        let mut sim = Self::new();
        sim.script.extend(frames);
        sim
    }

    /// Append a frame to the end of the script.
    pub fn push_frame(&mut self, frame: SimFrame) {
        self.script.push_back(frame);
    }

    /// Number of scripted frames not yet consumed.
    pub fn frames_remaining(&self) -> usize {
        self.script.len()
    }

    /// Override the size reported to the ABI check. Anything other than
    /// [`PAD_STATE_SIZE`] makes controller construction fail.
    pub fn set_reported_state_size(&mut self, size: usize) {
        self.reported_size = size;
    }

    /// The `(max_players, styles)` pair negotiated so far, if any.
    pub fn configured(&self) -> Option<(u8, NpadStyleSet)> {
        self.configured
    }
}

impl Default for SimulatedHid {
    fn default() -> Self {
        Self::new()
    }
}

impl HidBackend for SimulatedHid {
    fn configure_input(&mut self, max_players: u8, styles: NpadStyleSet) {
        self.configured = Some((max_players, styles));
    }

    fn is_configured(&self) -> bool {
        self.configured.is_some()
    }

    fn state_size(&self) -> usize {
        self.reported_size
    }

    fn initialize_with_mask(&mut self, state: &mut PadState, mask: u64) {
        *state = PadState::default();
        // Only players 1-8 and the handheld flag have snapshot bytes;
        // the Other bit participates in the mask but has no field.
        state.id_mask = (mask & 0xff) as u8;
        state.read_handheld = ((mask >> NpadIdType::Handheld as u64) & 1) as u8;
        // The simulation treats every requested slot as attached
        state.active_id_mask = state.id_mask;
        state.active_handheld = state.read_handheld;
        state.attributes = 1;
        state.style_set = self
            .configured
            .map_or(0, |(_, styles)| styles.bits());
    }

    fn update(&mut self, state: &mut PadState) {
        state.buttons_old = state.buttons_cur;
        let frame = self.script.pop_front().unwrap_or(self.last);
        state.buttons_cur = frame.buttons;
        state.sticks = frame.sticks;
        state.gc_triggers = frame.gc_triggers;
        self.last = frame;
    }
}
