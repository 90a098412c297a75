use petalfall::{
    DetectionSlot, EngineContext, FixedTimestep, FrameInput, InputEvent, PointerState,
    ProtocolLayout, RenderContext, Sketch, SketchConfig, Surface,
};
#[cfg(feature = "vectors")]
use petalfall::VectorState;

/// Generic sketch runner that wires up the frame loop.
///
/// Each concrete sketch creates a `thread_local!` SketchRunner and exports
/// free functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct SketchRunner<S: Sketch> {
    sketch: S,
    ctx: EngineContext,
    pointer: PointerState,
    detection: DetectionSlot,
    timestep: FixedTimestep,
    layout: ProtocolLayout,
    width: f32,
    height: f32,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
    initialized: bool,
}

impl<S: Sketch> SketchRunner<S> {
    pub fn new(sketch: S) -> Self {
        let config = sketch.config();
        Self::with_config(sketch, config)
    }

    /// Build a runner around a host-supplied configuration instead of the
    /// sketch's own.
    pub fn with_config(sketch: S, config: SketchConfig) -> Self {
        let timestep = FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps_per_frame);
        let layout = ProtocolLayout::from_config(&config);
        let detection = DetectionSlot::with_stale_after(config.detection_stale_after);

        Self {
            sketch,
            width: config.world_width,
            height: config.world_height,
            #[cfg(feature = "vectors")]
            vectors: VectorState::with_capacity(config.max_vector_vertices),
            ctx: EngineContext::new(config),
            pointer: PointerState::new(),
            detection,
            timestep,
            layout,
            initialized: false,
        }
    }

    /// Initialize the sketch. Call once after construction.
    pub fn init(&mut self) {
        let surface = self.surface();
        self.sketch.init(&mut self.ctx, &surface);
        self.initialized = true;
        log::debug!(
            "runner ready: {}x{}, dt {:.4}s, buffer {} floats",
            self.width,
            self.height,
            self.timestep.dt(),
            self.layout.buffer_total_floats
        );
    }

    /// Fold a pointer event into the pointer position the next frame sees.
    /// Non-finite coordinates are dropped.
    pub fn push_input(&mut self, event: InputEvent) {
        self.pointer.apply(event);
    }

    /// Detector adapter callback: `hands` is the number of hands found by
    /// the latest inference.
    pub fn publish_hands(&mut self, hands: u32) {
        self.detection.publish(hands, self.timestep.ticks());
    }

    /// The host canvas changed size.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("ignoring resize to {}x{}", width, height);
            return;
        }
        log::debug!("resize {}x{} -> {}x{}", self.width, self.height, width, height);
        self.width = width;
        self.height = height;
    }

    fn surface(&self) -> Surface {
        Surface::new(self.width, self.height, self.pointer.x())
    }

    /// Run one host frame: step the sketch, then rebuild the vector buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let start = self.timestep.ticks();
        let steps = self.timestep.accumulate(dt);
        let surface = self.surface();
        for i in 1..=steps as u64 {
            let tick = start + i;
            let frame = FrameInput {
                surface,
                hand_present: self.detection.sample(tick),
                tick,
            };
            self.sketch.update(&mut self.ctx, &frame);
        }

        #[cfg(feature = "vectors")]
        {
            self.vectors.clear();
            let mut render_ctx = RenderContext {
                painter: &mut self.vectors,
                surface,
            };
            self.sketch.render(&mut render_ctx);
        }
    }

    pub fn sketch(&self) -> &S {
        &self.sketch
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.width
    }

    pub fn world_height(&self) -> f32 {
        self.height
    }

    pub fn frame_count(&self) -> f64 {
        self.timestep.ticks() as f64
    }

    /// Detector reports overwritten before a frame read them.
    pub fn dropped_detections(&self) -> f64 {
        self.detection.dropped() as f64
    }

    // ---- Capacity accessors (read by JavaScript via wasm_bindgen exports) ----

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
