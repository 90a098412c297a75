//! One falling flower / snowflake.

use std::f32::consts::TAU;

use glam::Vec2;

use super::config::FieldConfig;
use super::mapping::{remap, MappingTable, ValueRange};
use super::mode::Mode;
use super::rng::Rng;
use crate::renderer::{Color, Painter, Surface};

/// A single recycled particle.
///
/// Size, speed, opacity and color are derived from `mode` and only change
/// together through [`Particle::set_mode`], so they never disagree with it.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Center in surface pixels, y pointing down.
    pub pos: Vec2,
    /// Diameter while a flower.
    pub base_size: f32,
    /// Diameter while a snowflake.
    pub snow_size: f32,
    /// Current orientation in radians. Only advances in flower mode.
    pub rotation: f32,
    /// Radians per frame.
    pub rotation_speed: f32,
    /// Constant horizontal drift in pixels per frame.
    pub wind_bias: f32,
    size: f32,
    speed: f32,
    opacity: f32,
    color: Color,
    mode: Mode,
}

impl Particle {
    /// Create a particle anywhere on the surface, already showing `mode`.
    ///
    /// Speed and opacity come from `config.spawn_mapping` when set, so a
    /// freshly spawned particle can fall at a different rate than the same
    /// particle after its first mode switch or reset.
    pub fn spawn(mode: Mode, surface: &Surface, config: &FieldConfig, rng: &mut Rng) -> Self {
        let pos = Vec2::new(rng.range(0.0, surface.width), rng.range(0.0, surface.height));
        let base_size = config.flower_size.sample(rng);
        let snow_size = config.snow_size.sample(rng);

        let mut p = Particle {
            pos,
            base_size,
            snow_size,
            rotation: 0.0,
            rotation_speed: 0.0,
            wind_bias: 0.0,
            size: 0.0,
            speed: 0.0,
            opacity: 0.0,
            color: Color::WHITE,
            mode,
        };

        let table = config
            .spawn_mapping
            .unwrap_or_else(|| *mode_table(mode, config));
        p.derive(mode, &table, config, rng);

        p.rotation_speed = config.rotation_speed.sample(rng);
        p.rotation = rng.range(0.0, TAU);
        p.wind_bias = config.wind_bias.sample(rng);
        p
    }

    /// Switch to `mode` and re-derive size, speed, opacity and color from its
    /// mapping table. Safe to call with the current mode; flower petals get a
    /// freshly drawn tint each time.
    pub fn set_mode(&mut self, mode: Mode, config: &FieldConfig, rng: &mut Rng) {
        let table = *mode_table(mode, config);
        self.derive(mode, &table, config, rng);
    }

    fn derive(&mut self, mode: Mode, table: &MappingTable, config: &FieldConfig, rng: &mut Rng) {
        self.mode = mode;
        self.size = match mode {
            Mode::Flower => self.base_size,
            Mode::Snow => self.snow_size,
        };
        self.speed = table.speed_for(self.size);
        self.opacity = table.opacity_for(self.size);
        self.color = match mode {
            Mode::Flower => {
                let g = config.petal_channel.sample(rng);
                let b = config.petal_channel.sample(rng);
                Color::from_255(255.0, g, b, self.opacity)
            }
            Mode::Snow => Color::WHITE.with_alpha(self.opacity / 255.0),
        };
    }

    /// Advance one frame: drift with wind, fall, spin, recycle off the
    /// bottom, wrap across the sides.
    pub fn update(&mut self, surface: &Surface, config: &FieldConfig, rng: &mut Rng) {
        let wind = wind_force(surface);

        self.pos.x += self.wind_bias + wind * config.wind_gain;
        self.pos.y += self.speed;

        if self.mode == Mode::Flower {
            self.rotation += self.rotation_speed;
        }

        if self.pos.y > surface.height {
            self.reset(surface, config, rng);
        }

        let half = self.size / 2.0;
        if self.pos.x > surface.width + half {
            self.pos.x = -half;
        } else if self.pos.x < -half {
            self.pos.x = surface.width + half;
        }
    }

    /// Recycle to just above the top edge at a random column, keeping the mode.
    pub fn reset(&mut self, surface: &Surface, config: &FieldConfig, rng: &mut Rng) {
        self.pos.y = -self.size;
        self.pos.x = rng.range(0.0, surface.width);
        self.rotation = rng.range(0.0, TAU);
        self.set_mode(self.mode, config, rng);
    }

    /// Draw through `painter`: a rotated ring of petals plus a stamen in
    /// flower mode, a plain disc in snow mode.
    pub fn display<P: Painter + ?Sized>(&self, painter: &mut P, config: &FieldConfig) {
        match self.mode {
            Mode::Flower => {
                let petals = config.petal_count.max(1);
                let step = TAU / petals as f32;
                let radii = Vec2::new(self.size / 2.5 / 2.0, self.size / 1.5 / 2.0);
                let offset = self.size / 4.0;

                for i in 0..petals {
                    let angle = self.rotation + step * i as f32;
                    // Local (0, offset) rotated by `angle`.
                    let center = self.pos + Vec2::new(-offset * angle.sin(), offset * angle.cos());
                    painter.fill_ellipse(center, radii, angle, self.color);
                }

                let stamen = Color::rgb8_alpha(config.stamen_rgb, self.opacity);
                painter.fill_circle(self.pos, self.size / 8.0, stamen);
            }
            Mode::Snow => {
                painter.fill_circle(self.pos, self.size / 2.0, self.color);
            }
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current diameter.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Fall speed in pixels per frame.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Opacity on the 0–255 scale.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

fn mode_table(mode: Mode, config: &FieldConfig) -> &MappingTable {
    match mode {
        Mode::Flower => &config.flower_mapping,
        Mode::Snow => &config.snow_mapping,
    }
}

/// Pointer position across the surface mapped to [-1, 1]; outside the
/// surface it extrapolates. A zero-width surface or a non-finite pointer
/// has no wind.
pub fn wind_force(surface: &Surface) -> f32 {
    if !(surface.width > 0.0 && surface.pointer_x.is_finite()) {
        return 0.0;
    }
    remap(
        surface.pointer_x,
        ValueRange::new(0.0, surface.width),
        ValueRange::new(-1.0, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Shape, ShapeRecorder};

    const EPS: f32 = 1e-4;

    fn surface() -> Surface {
        Surface::new(640.0, 480.0, 320.0)
    }

    fn flower(seed: u64) -> (Particle, FieldConfig, Rng) {
        let cfg = FieldConfig::default();
        let mut rng = Rng::new(seed);
        let p = Particle::spawn(Mode::Flower, &surface(), &cfg, &mut rng);
        (p, cfg, rng)
    }

    fn is_warm(c: Color) -> bool {
        let lo = 180.0 / 255.0 - EPS;
        let hi = 230.0 / 255.0 + EPS;
        c.r == 1.0 && c.g >= lo && c.g <= hi && c.b >= lo && c.b <= hi
    }

    #[test]
    fn spawn_samples_within_ranges() {
        for seed in 1..50 {
            let (p, _, _) = flower(seed);
            assert!(p.pos.x >= 0.0 && p.pos.x < 640.0);
            assert!(p.pos.y >= 0.0 && p.pos.y < 480.0);
            assert!(p.base_size >= 10.0 && p.base_size < 20.0);
            assert!(p.snow_size >= 2.0 && p.snow_size < 5.0);
            assert!(p.rotation_speed >= -0.02 && p.rotation_speed < 0.02);
            assert!(p.rotation >= 0.0 && p.rotation < TAU);
            assert!(p.wind_bias >= -0.3 && p.wind_bias < 0.3);
            assert_eq!(p.size(), p.base_size);
            assert!(is_warm(p.color()));
        }
    }

    #[test]
    fn spawn_uses_spawn_mapping() {
        let (p, cfg, _) = flower(3);
        let spawn = cfg.spawn_mapping.unwrap();
        assert!((p.speed() - spawn.speed_for(p.base_size)).abs() < EPS);
        assert!((p.opacity() - spawn.opacity_for(p.base_size)).abs() < EPS);
    }

    #[test]
    fn spawn_without_spawn_mapping_uses_mode_table() {
        let cfg = FieldConfig { spawn_mapping: None, ..FieldConfig::default() };
        let mut rng = Rng::new(3);
        let p = Particle::spawn(Mode::Snow, &surface(), &cfg, &mut rng);
        assert_eq!(p.size(), p.snow_size);
        assert!((p.speed() - cfg.snow_mapping.speed_for(p.snow_size)).abs() < EPS);
    }

    #[test]
    fn spawn_in_snow_mode_is_white() {
        let cfg = FieldConfig::default();
        let mut rng = Rng::new(11);
        let p = Particle::spawn(Mode::Snow, &surface(), &cfg, &mut rng);
        assert_eq!(p.mode(), Mode::Snow);
        assert_eq!(p.size(), p.snow_size);
        assert!(p.color().is_achromatic());
    }

    #[test]
    fn set_mode_snow_then_flower() {
        let (mut p, cfg, mut rng) = flower(5);

        p.set_mode(Mode::Snow, &cfg, &mut rng);
        assert_eq!(p.mode(), Mode::Snow);
        assert_eq!(p.size(), p.snow_size);
        assert!(p.color().is_achromatic());
        assert_eq!(p.color().r, 1.0);
        assert!((p.speed() - cfg.snow_mapping.speed_for(p.snow_size)).abs() < EPS);
        assert!((p.color().a - p.opacity() / 255.0).abs() < EPS);

        p.set_mode(Mode::Flower, &cfg, &mut rng);
        assert_eq!(p.size(), p.base_size);
        assert!(is_warm(p.color()));
        assert!((p.speed() - cfg.flower_mapping.speed_for(p.base_size)).abs() < EPS);
    }

    #[test]
    fn set_mode_is_idempotent_for_derived_values() {
        let (mut p, cfg, mut rng) = flower(8);
        p.set_mode(Mode::Snow, &cfg, &mut rng);
        let (size, speed, opacity) = (p.size(), p.speed(), p.opacity());
        p.set_mode(Mode::Snow, &cfg, &mut rng);
        assert_eq!((p.size(), p.speed(), p.opacity()), (size, speed, opacity));
    }

    #[test]
    fn snow_speed_and_opacity_ranges() {
        let cfg = FieldConfig::default();
        let mut rng = Rng::new(21);
        for _ in 0..200 {
            let mut p = Particle::spawn(Mode::Flower, &surface(), &cfg, &mut rng);
            p.set_mode(Mode::Snow, &cfg, &mut rng);
            assert!(p.speed() >= 0.5 - EPS && p.speed() <= 2.5 + EPS);
            assert!(p.opacity() >= 150.0 - EPS && p.opacity() <= 255.0 + EPS);
        }
    }

    #[test]
    fn update_moves_with_speed_and_wind() {
        let (mut p, cfg, mut rng) = flower(9);
        p.pos = Vec2::new(100.0, 100.0);
        let before = p.pos;
        // Pointer at the far right: wind force +1.
        p.update(&surface().with_pointer(640.0), &cfg, &mut rng);
        assert!((p.pos.x - (before.x + p.wind_bias + 0.5)).abs() < EPS);
        assert!((p.pos.y - (before.y + p.speed())).abs() < EPS);
    }

    #[test]
    fn rotation_only_advances_for_flowers() {
        let (mut p, cfg, mut rng) = flower(10);
        p.pos = Vec2::new(100.0, 100.0);
        let r0 = p.rotation;
        p.update(&surface(), &cfg, &mut rng);
        assert!((p.rotation - (r0 + p.rotation_speed)).abs() < EPS);

        p.set_mode(Mode::Snow, &cfg, &mut rng);
        let r1 = p.rotation;
        p.update(&surface(), &cfg, &mut rng);
        assert_eq!(p.rotation, r1);
    }

    #[test]
    fn falling_past_bottom_resets_above_top() {
        let (mut p, cfg, mut rng) = flower(12);
        p.set_mode(Mode::Snow, &cfg, &mut rng);
        p.pos = Vec2::new(200.0, 479.9);
        p.update(&surface(), &cfg, &mut rng);
        assert_eq!(p.pos.y, -p.size());
        assert_eq!(p.mode(), Mode::Snow);
        assert_eq!(p.size(), p.snow_size);
    }

    #[test]
    fn y_never_exceeds_height() {
        let (mut p, cfg, mut rng) = flower(13);
        let s = surface();
        for _ in 0..5_000 {
            p.update(&s, &cfg, &mut rng);
            assert!(p.pos.y <= s.height, "y escaped: {}", p.pos.y);
            assert!(p.pos.y >= -p.size() - EPS);
        }
    }

    #[test]
    fn x_stays_within_wrap_bounds() {
        let cfg = FieldConfig::default();
        let mut rng = Rng::new(14);
        for pointer in [-500.0, 0.0, 320.0, 640.0, 2000.0] {
            let s = surface().with_pointer(pointer);
            let mut p = Particle::spawn(Mode::Flower, &s, &cfg, &mut rng);
            for _ in 0..2_000 {
                p.update(&s, &cfg, &mut rng);
                let half = p.size() / 2.0;
                assert!(p.pos.x >= -half && p.pos.x <= s.width + half, "x escaped: {}", p.pos.x);
            }
        }
    }

    #[test]
    fn wraps_right_edge_to_left() {
        let (mut p, cfg, mut rng) = flower(15);
        p.pos = Vec2::new(640.0 + p.size() / 2.0 - 0.01, 10.0);
        p.wind_bias = 0.3;
        p.update(&surface().with_pointer(640.0), &cfg, &mut rng);
        assert_eq!(p.pos.x, -p.size() / 2.0);
    }

    #[test]
    fn wraps_left_edge_to_right() {
        let (mut p, cfg, mut rng) = flower(16);
        p.pos = Vec2::new(-p.size() / 2.0 + 0.01, 10.0);
        p.wind_bias = -0.3;
        p.update(&surface().with_pointer(0.0), &cfg, &mut rng);
        assert_eq!(p.pos.x, 640.0 + p.size() / 2.0);
    }

    #[test]
    fn wind_force_mapping() {
        assert!((wind_force(&Surface::new(640.0, 480.0, 0.0)) + 1.0).abs() < EPS);
        assert!(wind_force(&Surface::new(640.0, 480.0, 320.0)).abs() < EPS);
        assert!((wind_force(&Surface::new(640.0, 480.0, 640.0)) - 1.0).abs() < EPS);
        assert_eq!(wind_force(&Surface::new(0.0, 480.0, 10.0)), 0.0);
    }

    #[test]
    fn non_finite_pointer_means_no_wind() {
        for pointer in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(wind_force(&Surface::new(640.0, 480.0, pointer)), 0.0);
        }
    }

    #[test]
    fn flower_display_draws_petals_and_stamen() {
        let (p, cfg, _) = flower(17);
        let mut rec = ShapeRecorder::new();
        p.display(&mut rec, &cfg);

        assert_eq!(rec.ellipse_count(), 5);
        assert_eq!(rec.circle_count(), 1);

        let offset = p.size() / 4.0;
        for (i, shape) in rec.shapes.iter().take(5).enumerate() {
            match *shape {
                Shape::Ellipse { center, radii, rotation, color } => {
                    assert!(((center - p.pos).length() - offset).abs() < 1e-3);
                    assert!((radii.x - p.size() / 5.0).abs() < EPS);
                    assert!((radii.y - p.size() / 3.0).abs() < EPS);
                    let expected = p.rotation + TAU / 5.0 * i as f32;
                    assert!((rotation - expected).abs() < EPS);
                    assert_eq!(color, p.color());
                }
                _ => panic!("expected petal ellipse"),
            }
        }
        match rec.shapes[5] {
            Shape::Circle { center, radius, color } => {
                assert_eq!(center, p.pos);
                assert!((radius - p.size() / 8.0).abs() < EPS);
                assert_eq!(color.r, 1.0);
                assert!((color.g - 200.0 / 255.0).abs() < EPS);
                assert_eq!(color.b, 0.0);
            }
            _ => panic!("expected stamen circle"),
        }
    }

    #[test]
    fn snow_display_draws_one_disc() {
        let (mut p, cfg, mut rng) = flower(18);
        p.set_mode(Mode::Snow, &cfg, &mut rng);
        let mut rec = ShapeRecorder::new();
        p.display(&mut rec, &cfg);
        assert_eq!(rec.shapes.len(), 1);
        match rec.shapes[0] {
            Shape::Circle { center, radius, color } => {
                assert_eq!(center, p.pos);
                assert!((radius - p.snow_size / 2.0).abs() < EPS);
                assert!(color.is_achromatic());
            }
            _ => panic!("expected snow disc"),
        }
    }
}
