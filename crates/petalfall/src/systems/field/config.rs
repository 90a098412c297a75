use serde::{Deserialize, Serialize};

use super::mapping::{MappingTable, ValueRange};
use crate::api::error::ConfigError;

/// Tunable constants of the particle field.
///
/// `Default` is the classic 640x480 flower/snow sketch. Every field is
/// optional in JSON; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles, fixed for the lifetime of the field.
    pub particle_count: usize,
    /// Flower diameter range, sampled once per particle.
    pub flower_size: ValueRange,
    /// Snowflake diameter range, sampled once per particle.
    pub snow_size: ValueRange,
    /// Mapping used when a particle is first spawned.
    /// `None` spawns with the per-mode table instead.
    pub spawn_mapping: Option<MappingTable>,
    /// Mapping applied by a switch into flower mode (and by resets in it).
    pub flower_mapping: MappingTable,
    /// Mapping applied by a switch into snow mode (and by resets in it).
    pub snow_mapping: MappingTable,
    /// Green and blue channel range (0–255) of a petal; red is always 255.
    pub petal_channel: ValueRange,
    /// Stamen RGB.
    pub stamen_rgb: [u8; 3],
    /// Petals per flower.
    pub petal_count: u32,
    /// Spin in radians per frame, flower mode only.
    pub rotation_speed: ValueRange,
    /// Constant per-particle horizontal drift in pixels per frame.
    pub wind_bias: ValueRange,
    /// Multiplier on the pointer-driven wind force in [-1, 1].
    pub wind_gain: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 150,
            flower_size: ValueRange::new(10.0, 20.0),
            snow_size: ValueRange::new(2.0, 5.0),
            spawn_mapping: Some(MappingTable::new(
                ValueRange::new(2.0, 20.0),
                ValueRange::new(0.5, 3.5),
                ValueRange::new(150.0, 255.0),
            )),
            flower_mapping: MappingTable::new(
                ValueRange::new(10.0, 20.0),
                ValueRange::new(0.8, 3.5),
                ValueRange::new(150.0, 255.0),
            ),
            snow_mapping: MappingTable::new(
                ValueRange::new(2.0, 5.0),
                ValueRange::new(0.5, 2.5),
                ValueRange::new(150.0, 255.0),
            ),
            petal_channel: ValueRange::new(180.0, 230.0),
            stamen_rgb: [255, 200, 0],
            petal_count: 5,
            rotation_speed: ValueRange::new(-0.02, 0.02),
            wind_bias: ValueRange::new(-0.3, 0.3),
            wind_gain: 0.5,
        }
    }
}

impl FieldConfig {
    /// Check the invariants the simulation relies on: a non-empty field,
    /// positive non-empty size ranges, and non-empty sampling and mapping
    /// ranges. An inverted range would otherwise collapse to its `min`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::EmptyField);
        }
        if self.petal_count == 0 {
            return Err(ConfigError::NoPetals);
        }

        check_sizes("flower_size", self.flower_size)?;
        check_sizes("snow_size", self.snow_size)?;

        if let Some(spawn) = &self.spawn_mapping {
            check_source("spawn_mapping.size", spawn.size)?;
        }
        check_source("flower_mapping.size", self.flower_mapping.size)?;
        check_source("snow_mapping.size", self.snow_mapping.size)?;

        check_source("petal_channel", self.petal_channel)?;
        check_source("rotation_speed", self.rotation_speed)?;
        check_source("wind_bias", self.wind_bias)?;
        Ok(())
    }
}

fn check_sizes(name: &'static str, range: ValueRange) -> Result<(), ConfigError> {
    if !(range.min.is_finite() && range.max.is_finite()) || range.min <= 0.0 || range.max <= range.min {
        return Err(ConfigError::DegenerateRange { name, min: range.min, max: range.max });
    }
    Ok(())
}

fn check_source(name: &'static str, range: ValueRange) -> Result<(), ConfigError> {
    if range.is_degenerate() {
        return Err(ConfigError::DegenerateRange { name, min: range.min, max: range.max });
    }
    Ok(())
}
