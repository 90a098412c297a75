/// SharedArrayBuffer layout.
/// Must stay in sync with the JavaScript reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Vectors: max_vector_vertices × 6 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// The header is owned by the JavaScript side (frame lock, counters). Rust
/// only reserves it; JavaScript reads the capacities through the
/// `get_max_*` exports and computes offsets from them.

use crate::api::sketch::SketchConfig;

/// Number of floats reserved in front of the vector section.
pub const HEADER_FLOATS: usize = 16;

/// Floats per vector vertex: x, y, r, g, b, a (fixed wire format).
pub const VECTOR_VERTEX_FLOATS: usize = 6;

/// Floats per event: kind, a, b, c (fixed wire format).
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_vector_vertices: usize,
    pub max_events: usize,

    /// Size of the vector section in floats.
    pub vector_data_floats: usize,
    /// Size of the event section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where vector data begins.
    pub vector_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_vector_vertices: usize, max_events: usize) -> Self {
        let vector_data_floats = max_vector_vertices * VECTOR_VERTEX_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let vector_data_offset = HEADER_FLOATS;
        let event_data_offset = vector_data_offset + vector_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_vector_vertices,
            max_events,
            vector_data_floats,
            event_data_floats,
            vector_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a SketchConfig.
    pub fn from_config(config: &SketchConfig) -> Self {
        Self::new(config.max_vector_vertices, config.max_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config() {
        let layout = ProtocolLayout::from_config(&SketchConfig::default());
        assert_eq!(layout.max_vector_vertices, 131_072);
        assert_eq!(layout.max_events, 32);
        assert_eq!(layout.vector_data_offset, HEADER_FLOATS);
        assert_eq!(layout.event_data_offset, HEADER_FLOATS + 131_072 * 6);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS + 131_072 * 6 + 32 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 20);
        assert_eq!(layout.event_data_offset, layout.vector_data_offset + layout.vector_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }
}
