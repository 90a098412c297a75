//! Drawing contract between the simulation and whatever rasterizes it.
//!
//! The engine never draws pixels itself. Particles describe their shapes
//! through a [`Painter`]; the lyon-backed `VectorState` turns those calls into
//! a triangle list for the browser, and tests record them directly.

use glam::Vec2;

use super::color::Color;

/// The render surface as seen by one simulation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Visible width in pixels.
    pub width: f32,
    /// Visible height in pixels.
    pub height: f32,
    /// Horizontal pointer position in surface pixels. Not clamped; the pointer
    /// may sit outside the canvas.
    pub pointer_x: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32, pointer_x: f32) -> Self {
        Self { width, height, pointer_x }
    }

    /// Same size, different pointer.
    pub fn with_pointer(self, pointer_x: f32) -> Self {
        Self { pointer_x, ..self }
    }
}

/// Filled-shape sink for particle rendering.
///
/// # Example Implementation
///
/// ```ignore
/// struct CountingPainter(usize);
///
/// impl Painter for CountingPainter {
///     fn fill_ellipse(&mut self, _: Vec2, _: Vec2, _: f32, _: Color) { self.0 += 1; }
///     fn fill_circle(&mut self, _: Vec2, _: f32, _: Color) { self.0 += 1; }
/// }
/// ```
pub trait Painter {
    /// Fill an ellipse with the given semi-axes, rotated by `rotation` radians
    /// about its own center.
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: Color);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// One recorded painter call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Ellipse { center: Vec2, radii: Vec2, rotation: f32, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
}

/// Painter that keeps every call, for hosts that rasterize themselves
/// (e.g. Canvas 2D `ellipse()`) and for tests.
#[derive(Debug, Default)]
pub struct ShapeRecorder {
    pub shapes: Vec<Shape>,
}

impl ShapeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn ellipse_count(&self) -> usize {
        self.shapes.iter().filter(|s| matches!(s, Shape::Ellipse { .. })).count()
    }

    pub fn circle_count(&self) -> usize {
        self.shapes.iter().filter(|s| matches!(s, Shape::Circle { .. })).count()
    }
}

impl Painter for ShapeRecorder {
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: Color) {
        self.shapes.push(Shape::Ellipse { center, radii, rotation, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.shapes.push(Shape::Circle { center, radius, color });
    }
}
