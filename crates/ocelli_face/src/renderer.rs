//! Eye renderer
//!
//! Redraws both eyes from scratch every frame: the eye layer carries the
//! bloom filter, each eye is translated by its container's offset in the
//! scene arena, and a lid
//! mask (when one exists) clips that eye's dot field.

use crate::config::BloomConfig;
use crate::dots::DotField;
use crate::state::FaceState;
use ocelli_paint::{Color, Surface};

pub struct EyeRenderer {
    dots: DotField,
    bloom: BloomConfig,
    color: Color,
}

impl EyeRenderer {
    pub fn new(dots: DotField, bloom: BloomConfig, color: Color) -> Self {
        Self { dots, bloom, color }
    }

    pub fn render(&self, state: &FaceState, surface: &mut impl Surface) {
        surface.push_layer(Some(self.bloom.filter()));
        for (side, eye) in state.eyes.iter() {
            let container = state.scene.container(side);
            surface.push_translate(0.0, state.scene.world_offset(container));

            let mask = state.scene.mask(side);
            if let Some(shape) = mask {
                surface.push_mask(&shape.path(eye));
            }
            for dot in self.dots.dots(eye) {
                surface.fill_circle(dot.center, dot.radius, self.color);
            }
            if mask.is_some() {
                surface.pop_mask();
            }

            surface.pop_transform();
        }
        surface.pop_layer();
    }
}
