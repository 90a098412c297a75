use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;
use crate::api::types::SketchEvent;
use crate::renderer::{Painter, Surface};
use crate::systems::field::FieldConfig;

/// Configuration for the engine, provided by the sketch or by the host as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Most simulation frames run for one host frame (default: 4).
    pub max_steps_per_frame: u32,
    /// Initial surface width in pixels (default: 640, the webcam width).
    pub world_width: f32,
    /// Initial surface height in pixels (default: 480).
    pub world_height: f32,
    /// RNG seed for the particle field.
    pub seed: u64,
    /// Maximum tessellated vertices per frame (default: 131072).
    pub max_vector_vertices: usize,
    /// Maximum outbound events per frame (default: 32).
    pub max_events: usize,
    /// Frames after which an un-refreshed hand report counts as "no hand".
    /// `None` keeps the last report forever.
    pub detection_stale_after: Option<u64>,
    /// Particle field constants.
    pub field: FieldConfig,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 4,
            world_width: 640.0,
            world_height: 480.0,
            seed: 42,
            max_vector_vertices: 131_072,
            max_events: 32,
            detection_stale_after: Some(120),
            field: FieldConfig::default(),
        }
    }
}

impl SketchConfig {
    /// Parse a (possibly partial) configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SketchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(ConfigError::InvalidWorldSize {
                width: self.world_width,
                height: self.world_height,
            });
        }
        if !(self.fixed_dt > 0.0) {
            return Err(ConfigError::InvalidTimestep(self.fixed_dt));
        }
        self.field.validate()
    }
}

/// The core contract every sketch must fulfill.
pub trait Sketch {
    /// Return engine configuration. Called once before init unless the host
    /// supplies its own.
    fn config(&self) -> SketchConfig {
        SketchConfig::default()
    }

    /// Build initial state for the given configuration and surface.
    fn init(&mut self, ctx: &mut EngineContext, surface: &Surface);

    /// One simulation frame.
    fn update(&mut self, ctx: &mut EngineContext, frame: &FrameInput);

    /// Optional read-only render pass.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Everything sampled from the outside world for one simulation frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub surface: Surface,
    /// Latest hand-presence level from the detector slot.
    pub hand_present: bool,
    /// Simulation frame counter, starting at 1.
    pub tick: u64,
}

/// Mutable engine state, passed to Sketch::init and Sketch::update.
pub struct EngineContext {
    pub config: SketchConfig,
    pub events: Vec<SketchEvent>,
}

impl EngineContext {
    pub fn new(config: SketchConfig) -> Self {
        let events = Vec::with_capacity(config.max_events);
        Self { config, events }
    }

    /// Emit an event to be forwarded to JavaScript. Events beyond
    /// `max_events` in one host frame are dropped.
    pub fn emit_event(&mut self, event: SketchEvent) {
        if self.events.len() < self.config.max_events {
            self.events.push(event);
        } else {
            log::warn!("event buffer full, dropping {:?}", event);
        }
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(SketchConfig::default())
    }
}

/// Render context for the sketch's draw pass.
pub struct RenderContext<'a> {
    pub painter: &'a mut dyn Painter,
    pub surface: Surface,
}
