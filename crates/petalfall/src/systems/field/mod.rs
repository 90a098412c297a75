//! The particle field: a fixed set of recycled flowers/snowflakes plus the
//! controller that flips them between the two looks.
//!
//! Per frame the host calls [`advance_frame`] with the sampled hand-presence
//! level and the current surface, then [`ParticleField::display`] with a
//! painter. Nothing here is global; the caller owns both the field and the
//! controller.

mod config;
mod mapping;
mod mode;
mod particle;
mod rng;

// Re-export public types
pub use config::FieldConfig;
pub use mapping::{remap, MappingTable, ValueRange};
pub use mode::{Mode, ModeController};
pub use particle::{wind_force, Particle};
pub use rng::Rng;

use crate::renderer::{Painter, Surface};

/// Fixed-size collection of particles. Particles are created once and only
/// ever recycled; the count never changes.
pub struct ParticleField {
    particles: Vec<Particle>,
    config: FieldConfig,
    rng: Rng,
    mode: Mode,
    broadcasts: u64,
}

impl ParticleField {
    /// Spawn `config.particle_count` particles across `surface`, all showing `mode`.
    pub fn new(config: FieldConfig, seed: u64, mode: Mode, surface: &Surface) -> Self {
        let mut rng = Rng::new(seed.wrapping_add(7919));
        let particles = (0..config.particle_count)
            .map(|_| Particle::spawn(mode, surface, &config, &mut rng))
            .collect::<Vec<_>>();

        log::debug!(
            "particle field: {} particles on {}x{} in {} mode",
            particles.len(),
            surface.width,
            surface.height,
            mode.name()
        );

        Self {
            particles,
            config,
            rng,
            mode,
            broadcasts: 0,
        }
    }

    /// Push `mode` to every particle.
    pub fn broadcast(&mut self, mode: Mode) {
        self.mode = mode;
        self.broadcasts += 1;
        for p in &mut self.particles {
            p.set_mode(mode, &self.config, &mut self.rng);
        }
    }

    /// Advance every particle by one frame.
    pub fn update(&mut self, surface: &Surface) {
        for p in &mut self.particles {
            p.update(surface, &self.config, &mut self.rng);
        }
    }

    /// Draw every particle in order.
    pub fn display<P: Painter + ?Sized>(&self, painter: &mut P) {
        for p in &self.particles {
            p.display(painter, &self.config);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Mode most recently broadcast (or spawned with).
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of broadcasts received.
    pub fn broadcasts(&self) -> u64 {
        self.broadcasts
    }
}

/// One simulation frame: let the controller react to `hand_present`,
/// broadcast on a transition, then move every particle.
/// Returns the new mode when this frame switched.
pub fn advance_frame(
    controller: &mut ModeController,
    field: &mut ParticleField,
    hand_present: bool,
    surface: &Surface,
) -> Option<Mode> {
    let switched = controller.observe(hand_present);
    if let Some(mode) = switched {
        field.broadcast(mode);
    }
    field.update(surface);
    switched
}
