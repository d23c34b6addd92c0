//! Ambient particle field
//!
//! A grid of softly pulsing dots behind the eyes. It runs on its own clock
//! and never interacts with the eyes.

use crate::config::BackgroundConfig;
use ocelli_paint::{Color, Point, Size, Surface};
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug)]
struct AmbientDot {
    position: Point,
    phase: f32,
}

pub struct AmbientField {
    config: BackgroundConfig,
    color: Color,
    dots: Vec<AmbientDot>,
    elapsed_ms: f32,
}

impl AmbientField {
    pub fn new(size: Size, config: BackgroundConfig, color: Color, rng: &mut impl Rng) -> Self {
        let mut dots = Vec::new();
        if config.enabled {
            let cols = (size.width / config.pitch).ceil() as usize + 1;
            let rows = (size.height / config.pitch).ceil() as usize + 1;
            for y in 0..rows {
                for x in 0..cols {
                    if rng.gen::<f32>() >= config.density {
                        continue;
                    }
                    dots.push(AmbientDot {
                        position: Point::new(x as f32 * config.pitch, y as f32 * config.pitch),
                        phase: rng.gen_range(0.0..TAU),
                    });
                }
            }
        }
        Self {
            color: color.with_alpha(config.alpha),
            config,
            dots,
            elapsed_ms: 0.0,
        }
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.elapsed_ms += dt_ms;
        if self.config.speed > 0.0 {
            self.elapsed_ms = self.elapsed_ms.rem_euclid(TAU / self.config.speed);
        }
    }

    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    /// Diameter of a dot with the given phase at the current time
    pub fn dot_size(&self, phase: f32) -> f32 {
        let c = &self.config;
        let pulse = 0.5 + 0.5 * (self.elapsed_ms * c.speed + phase).sin();
        c.min_size + pulse * c.wave_amplitude * (c.max_size - c.min_size)
    }

    pub fn render(&self, surface: &mut impl Surface) {
        if self.dots.is_empty() {
            return;
        }
        surface.push_layer(Some(self.config.bloom.filter()));
        for dot in &self.dots {
            surface.fill_circle(dot.position, self.dot_size(dot.phase) / 2.0, self.color);
        }
        surface.pop_layer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_full_density_fills_grid() {
        let mut rng = StdRng::seed_from_u64(3);
        let field = AmbientField::new(
            Size::new(200.0, 100.0),
            BackgroundConfig::default(),
            Color::WHITE,
            &mut rng,
        );
        // 5 columns by 3 rows
        assert_eq!(field.len(), 15);
    }

    #[test]
    fn test_pulse_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = AmbientField::new(
            Size::new(100.0, 100.0),
            BackgroundConfig::default(),
            Color::WHITE,
            &mut rng,
        );
        for _ in 0..100 {
            field.advance(97.0);
            let size = field.dot_size(1.0);
            // half the 3..7 range
            assert!((3.0..=5.0 + 1e-4).contains(&size));
        }
    }

    #[test]
    fn test_pulse_survives_long_uptime() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = AmbientField::new(
            Size::new(100.0, 100.0),
            BackgroundConfig::default(),
            Color::WHITE,
            &mut rng,
        );
        // a few days of uptime in hour-long steps
        for _ in 0..100 {
            field.advance(3_600_000.0);
        }
        assert!(field.elapsed_ms < TAU / field.config.speed);

        let mut sizes = Vec::new();
        for _ in 0..60 {
            field.advance(16.0);
            sizes.push(field.dot_size(0.0));
        }
        sizes.dedup();
        assert!(sizes.len() > 30, "{sizes:?}");
    }

    #[test]
    fn test_disabled_field_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = BackgroundConfig {
            enabled: false,
            ..Default::default()
        };
        let field = AmbientField::new(Size::new(100.0, 100.0), config, Color::WHITE, &mut rng);
        assert!(field.is_empty());
    }
}
