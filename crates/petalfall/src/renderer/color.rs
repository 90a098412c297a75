use serde::{Deserialize, Serialize};

/// RGBA color with channels in 0.0 – 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from channels on the 0–255 scale. Fractional values are kept.
    pub fn from_255(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r / 255.0,
            g: g / 255.0,
            b: b / 255.0,
            a: a / 255.0,
        }
    }

    /// Create a color from RGB u8 values with an alpha on the 0–255 scale.
    pub fn rgb8_alpha(rgb: [u8; 3], alpha: f32) -> Self {
        Self::from_255(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32, alpha)
    }

    /// Create a color with the given alpha value.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// True when red, green and blue are identical (a grey or white).
    pub fn is_achromatic(&self) -> bool {
        self.r == self.g && self.g == self.b
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
