use bytemuck::{Pod, Zeroable};

use crate::systems::field::Mode;

/// An event communicated from Rust to JavaScript.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SketchEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SketchEvent {
    pub const FLOATS: usize = 4;

    /// `a` = new mode (0 flower, 1 snow), `b`/`c` = simulation tick split
    /// into low and high 24-bit words (`tick = c * 2^24 + b`).
    pub const MODE_CHANGED: f32 = 1.0;

    /// Largest integer range an f32 holds exactly.
    const TICK_WORD: u64 = 1 << 24;

    /// The display mode switched on simulation frame `tick`.
    pub fn mode_changed(mode: Mode, tick: u64) -> Self {
        Self {
            kind: Self::MODE_CHANGED,
            a: mode.as_f32(),
            b: (tick % Self::TICK_WORD) as f32,
            c: (tick / Self::TICK_WORD) as f32,
        }
    }

    /// Reassemble the tick carried by a `MODE_CHANGED` event.
    pub fn tick(&self) -> u64 {
        self.c as u64 * Self::TICK_WORD + self.b as u64
    }
}
