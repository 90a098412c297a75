// systems/field/mapping.rs
//
// Linear range remapping and the size → (speed, opacity) tables.
// Pure math, no particle state.

use serde::{Deserialize, Serialize};

use super::rng::Rng;

/// A closed numeric interval `[min, max]`, sampled half-open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Width of the interval.
    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// True when the interval is empty, inverted or non-finite.
    pub fn is_degenerate(&self) -> bool {
        !(self.min.is_finite() && self.max.is_finite()) || self.span() <= 0.0
    }

    /// Draw a uniform value in `[min, max)`.
    pub fn sample(&self, rng: &mut Rng) -> f32 {
        rng.range(self.min, self.max)
    }
}

/// Linearly map `value` from `from` onto `to`. Not clamped: values outside
/// `from` extrapolate. A degenerate source collapses to `to.min`.
#[inline]
pub fn remap(value: f32, from: ValueRange, to: ValueRange) -> f32 {
    let span = from.span();
    if span == 0.0 {
        return to.min;
    }
    to.min + (value - from.min) / span * to.span()
}

/// How a particle's size drives its fall speed and opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappingTable {
    /// Source size interval.
    pub size: ValueRange,
    /// Fall speed in pixels per frame.
    pub speed: ValueRange,
    /// Opacity on the 0–255 scale.
    pub opacity: ValueRange,
}

impl MappingTable {
    pub const fn new(size: ValueRange, speed: ValueRange, opacity: ValueRange) -> Self {
        Self { size, speed, opacity }
    }

    #[inline]
    pub fn speed_for(&self, size: f32) -> f32 {
        remap(size, self.size, self.speed)
    }

    #[inline]
    pub fn opacity_for(&self, size: f32) -> f32 {
        remap(size, self.size, self.opacity)
    }
}
