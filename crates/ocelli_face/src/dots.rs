//! Halftone dot field
//!
//! Each eye is a grid of dots inside its radius. Dot size blends a radial
//! falloff, a top-to-bottom gradient and, while the eye is displaced, a bias
//! toward the direction of travel.

use crate::config::DotFieldConfig;
use crate::eye::EyeState;
use ocelli_animation::lerp;
use ocelli_paint::Point;

/// One dot, in surface coordinates before container offsets
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub center: Point,
    pub radius: f32,
}

#[derive(Clone, Debug)]
pub struct DotField {
    config: DotFieldConfig,
}

impl DotField {
    pub fn new(config: DotFieldConfig) -> Self {
        Self { config }
    }

    /// Cells from the center to the grid edge
    pub fn grid_radius(&self, eye_radius: f32) -> i32 {
        (eye_radius / self.config.pitch).ceil() as i32 + 1
    }

    /// Size blend in `[0, 1]`.
    ///
    /// `distance_ratio` is the elliptical distance over the eye radius,
    /// `vertical` runs 0 at the top row to 1 at the bottom row,
    /// `motion_weight` is capped at 0.3 and `alignment` is in `[0, 1]`.
    pub fn dot_blend(
        &self,
        distance_ratio: f32,
        vertical: f32,
        motion_weight: f32,
        alignment: f32,
    ) -> f32 {
        let radial = 1.0 - distance_ratio * distance_ratio;
        let c = &self.config;
        (c.radial_weight * radial + c.vertical_weight * vertical + motion_weight * alignment)
            .clamp(0.0, 1.0)
    }

    /// All dots of one eye
    pub fn dots(&self, eye: &EyeState) -> Vec<Dot> {
        let c = &self.config;
        let grid = self.grid_radius(eye.radius);

        let (mx, my) = eye.displacement();
        let moved = (mx * mx + my * my).sqrt();
        let (dir_x, dir_y) = if moved > 0.0 { (mx / moved, my / moved) } else { (0.0, 0.0) };
        let motion_weight = (moved / (eye.radius * 0.4)).min(0.3);

        let mut dots = Vec::new();
        for dy in -grid..=grid {
            for dx in -grid..=grid {
                let x = dx as f32 * c.pitch;
                let y = dy as f32 * c.pitch;
                let distance = ((x / c.ratio_x).powi(2) + (y / c.ratio_y).powi(2)).sqrt() * c.pitch;
                if distance > eye.radius {
                    continue;
                }

                let vertical = (dy + grid) as f32 / (grid * 2) as f32;
                let mut alignment = 0.0;
                if moved > 0.0 {
                    let (cell_x, cell_y) = (dx as f32 / grid as f32, dy as f32 / grid as f32);
                    let len = (cell_x * cell_x + cell_y * cell_y).sqrt();
                    if len > 0.0 {
                        alignment = ((cell_x / len) * dir_x + (cell_y / len) * dir_y + 1.0) / 2.0;
                    }
                }

                let blend =
                    self.dot_blend(distance / eye.radius, vertical, motion_weight, alignment);
                let size = lerp(c.min_size, c.max_size, blend);
                dots.push(Dot {
                    center: Point::new(eye.center.x + x, eye.center.y + y),
                    radius: size / 2.0,
                });
            }
        }
        dots
    }
}
