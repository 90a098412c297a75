pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::sketch::{Sketch, SketchConfig, EngineContext, RenderContext, FrameInput};
pub use api::types::SketchEvent;
pub use api::error::ConfigError;
pub use crate::core::time::FixedTimestep;
pub use input::pointer::{InputEvent, PointerState};
pub use input::detection::DetectionSlot;
pub use renderer::{Color, Painter, Shape, ShapeRecorder, Surface};
pub use bridge::protocol::ProtocolLayout;
pub use systems::field::{
    advance_frame, FieldConfig, MappingTable, Mode, ModeController, Particle, ParticleField, Rng,
    ValueRange,
};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex};
