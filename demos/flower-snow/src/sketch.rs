use petalfall::*;

/// Falling flowers that become snowflakes while a hand is in view.
pub struct FlowerSnow {
    controller: ModeController,
    field: Option<ParticleField>,
}

impl FlowerSnow {
    pub fn new() -> Self {
        Self {
            controller: ModeController::new(),
            field: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }
}

impl Default for FlowerSnow {
    fn default() -> Self {
        Self::new()
    }
}

impl Sketch for FlowerSnow {
    fn init(&mut self, ctx: &mut EngineContext, surface: &Surface) {
        self.controller = ModeController::new();
        self.field = Some(ParticleField::new(
            ctx.config.field.clone(),
            ctx.config.seed,
            self.controller.mode(),
            surface,
        ));
        log::info!(
            "flower-snow: {} particles, seed {}",
            ctx.config.field.particle_count,
            ctx.config.seed
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, frame: &FrameInput) {
        let Some(field) = self.field.as_mut() else {
            return;
        };
        if let Some(mode) =
            advance_frame(&mut self.controller, field, frame.hand_present, &frame.surface)
        {
            ctx.emit_event(SketchEvent::mode_changed(mode, frame.tick));
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        if let Some(field) = &self.field {
            field.display(&mut *ctx.painter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(hand_present: bool, tick: u64) -> FrameInput {
        FrameInput {
            surface: Surface::new(640.0, 480.0, 320.0),
            hand_present,
            tick,
        }
    }

    fn ready() -> (FlowerSnow, EngineContext) {
        let mut sketch = FlowerSnow::new();
        let mut ctx = EngineContext::default();
        sketch.init(&mut ctx, &Surface::new(640.0, 480.0, 0.0));
        (sketch, ctx)
    }

    #[test]
    fn starts_with_full_flower_field() {
        let (sketch, _) = ready();
        let field = sketch.field().unwrap();
        assert_eq!(field.len(), 150);
        assert_eq!(sketch.mode(), Mode::Flower);
        assert!(field.iter().all(|p| p.mode() == Mode::Flower));
    }

    #[test]
    fn update_before_init_is_a_no_op() {
        let mut sketch = FlowerSnow::new();
        let mut ctx = EngineContext::default();
        sketch.update(&mut ctx, &frame(true, 1));
        assert!(ctx.events.is_empty());
        assert_eq!(sketch.mode(), Mode::Flower);
    }

    #[test]
    fn hand_edges_emit_one_event_each() {
        let (mut sketch, mut ctx) = ready();
        let levels = [false, true, true, true, false, false, true];
        for (i, &level) in levels.iter().enumerate() {
            sketch.update(&mut ctx, &frame(level, i as u64 + 1));
        }

        let changes: Vec<(f32, f32)> = ctx.events.iter().map(|e| (e.a, e.b)).collect();
        assert_eq!(changes, vec![(1.0, 2.0), (0.0, 5.0), (1.0, 7.0)]);
        assert_eq!(sketch.mode(), Mode::Snow);
        assert!(sketch.field().unwrap().iter().all(|p| p.mode() == Mode::Snow));
    }

    #[test]
    fn render_paints_snow_as_circles_only() {
        let (mut sketch, mut ctx) = ready();
        sketch.update(&mut ctx, &frame(true, 1));

        let mut recorder = ShapeRecorder::default();
        let mut render_ctx = RenderContext {
            painter: &mut recorder,
            surface: Surface::new(640.0, 480.0, 320.0),
        };
        sketch.render(&mut render_ctx);
        assert_eq!(recorder.ellipse_count(), 0);
        assert_eq!(recorder.circle_count(), 150);
    }

    #[test]
    fn init_resets_mode() {
        let (mut sketch, mut ctx) = ready();
        sketch.update(&mut ctx, &frame(true, 1));
        assert_eq!(sketch.mode(), Mode::Snow);
        sketch.init(&mut ctx, &Surface::new(640.0, 480.0, 0.0));
        assert_eq!(sketch.mode(), Mode::Flower);
    }
}
