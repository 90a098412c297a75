//! Display mode and the edge-triggered controller that switches it.

use serde::{Deserialize, Serialize};

/// What every particle currently looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Large rotating five-petal flowers. Shown while no hand is visible.
    #[default]
    Flower,
    /// Small white snowflakes. Shown while a hand is visible.
    Snow,
}

impl Mode {
    /// The mode a given hand-presence level asks for.
    #[inline]
    pub fn for_hand(hand_present: bool) -> Self {
        if hand_present { Mode::Snow } else { Mode::Flower }
    }

    /// Wire encoding: 0.0 = Flower, 1.0 = Snow.
    pub fn as_f32(self) -> f32 {
        match self {
            Mode::Flower => 0.0,
            Mode::Snow => 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Flower => "flower",
            Mode::Snow => "snow",
        }
    }
}

/// Two-state machine turning a per-frame hand-presence level into mode
/// changes. Reports a change only on the frame the level flips relative to
/// the current mode; holding the same level never re-reports.
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    mode: Mode,
    transitions: u64,
}

impl ModeController {
    /// Start in flower mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's sample. Returns the new mode when a transition
    /// happens; the caller must broadcast it to the field.
    pub fn observe(&mut self, hand_present: bool) -> Option<Mode> {
        let next = Mode::for_hand(hand_present);
        if next == self.mode {
            return None;
        }

        self.mode = next;
        self.transitions += 1;
        match next {
            Mode::Snow => log::info!("hand detected, switching to snow"),
            Mode::Flower => log::info!("no hand detected, switching to flowers"),
        }
        Some(next)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of transitions (and therefore broadcasts) so far.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }
}
