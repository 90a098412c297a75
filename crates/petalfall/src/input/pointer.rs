use glam::Vec2;

/// Pointer events forwarded by the host page.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A touch/click began at surface coordinates (x, y). Touch screens only
    /// report a position this way.
    PointerDown { x: f32, y: f32 },
    /// A touch/cursor moved to surface coordinates (x, y).
    PointerMove { x: f32, y: f32 },
}

impl InputEvent {
    pub fn position(&self) -> Vec2 {
        match *self {
            InputEvent::PointerDown { x, y } | InputEvent::PointerMove { x, y } => Vec2::new(x, y),
        }
    }
}

/// Last known pointer position, folded from host events.
///
/// It starts at the origin, the way a canvas reports the cursor before it has
/// ever moved over it. Positions outside the surface are kept as-is; only
/// non-finite coordinates are refused.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    position: Vec2,
    rejected: u64,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the stored position. Returns `false` and keeps the
    /// previous position when the event carries NaN or infinite coordinates.
    pub fn apply(&mut self, event: InputEvent) -> bool {
        let pos = event.position();
        if !pos.is_finite() {
            if self.rejected == 0 {
                log::warn!("ignoring non-finite pointer event {:?}", event);
            }
            self.rejected += 1;
            return false;
        }
        self.position = pos;
        true
    }

    /// Last accepted pointer position.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Events refused because of non-finite coordinates.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}
