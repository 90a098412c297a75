//! Lyon-based tessellation of particle shapes.
//!
//! Turns [`Painter`] calls into a flat triangle list that the browser draws
//! in a single WebGPU/WebGL pass.
//!
//! # Usage
//!
//! ```ignore
//! let mut vectors = VectorState::with_capacity(65536);
//! vectors.clear();
//! field.display(&mut vectors);
//! let floats = vectors.vertex_count() * VectorVertex::FLOATS;
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::{point, vector, Angle};
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor, VertexBuffers,
};

use crate::renderer::{Color, Painter};

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24
}

/// Vertex constructor for lyon fill tessellation.
struct FillVertexCtor {
    color: Color,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// Tessellator plus output vertex buffer.
/// Cleared each frame and refilled by painter calls.
pub struct VectorState {
    fill_tess: FillTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    max_vertices: usize,
    overflowed: bool,
}

impl VectorState {
    pub fn new() -> Self {
        Self::with_capacity(65536)
    }

    /// Create a state that holds at most `max_vertices` vertices per frame.
    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
            max_vertices,
            overflowed: false,
        }
    }

    /// Clear the vertex buffer. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// True when a shape was dropped this frame because the buffer was full.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Raw pointer to the flat float buffer (for SAB copy).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.buffer
    }

    /// Flush indexed geometry to the flat buffer as a triangle list.
    /// Shapes that would not fit are dropped whole.
    fn flush_geometry(&mut self) {
        let needed = self.geometry.indices.len();
        if self.vertex_count() + needed > self.max_vertices {
            if !self.overflowed {
                log::warn!("vector buffer full ({} vertices), dropping shapes", self.max_vertices);
            }
            self.overflowed = true;
        } else {
            for idx in &self.geometry.indices {
                let v = &self.geometry.vertices[*idx as usize];
                self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
            }
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Tessellate and fill an arbitrary lyon Path.
    pub fn fill_path(&mut self, path: &Path, color: Color) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.25),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );

        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }
}

impl Painter for VectorState {
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: Color) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.add_ellipse(
            point(center.x, center.y),
            vector(radii.x, radii.y),
            Angle::radians(rotation),
            Winding::Positive,
        );
        let path = builder.build();

        self.fill_path(&path, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        let path = builder.build();

        self.fill_path(&path, color);
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}
