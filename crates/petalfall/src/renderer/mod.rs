pub mod color;
pub mod traits;

// Re-export key types for convenient access
pub use color::Color;
pub use traits::{Painter, Shape, ShapeRecorder, Surface};
