//! Configuration error types.
//!
//! The simulation itself has no failure paths; only loading constants from
//! host-supplied JSON can fail.

use thiserror::Error;

/// Errors raised while parsing or validating a sketch configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The JSON text did not parse into a configuration.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The field would contain no particles.
    #[error("particle count must be at least 1")]
    EmptyField,

    /// A range used for sampling or as a mapping source is empty, inverted or non-finite.
    #[error("range `{name}` is degenerate: [{min}, {max}]")]
    DegenerateRange {
        /// Config key of the offending range.
        name: &'static str,
        min: f32,
        max: f32,
    },

    /// A flower needs at least one petal.
    #[error("petal count must be at least 1")]
    NoPetals,

    /// World dimensions must be positive.
    #[error("world size must be positive, got {width}x{height}")]
    InvalidWorldSize { width: f32, height: f32 },

    /// The fixed timestep must be positive.
    #[error("fixed timestep must be positive, got {0}")]
    InvalidTimestep(f32),
}
