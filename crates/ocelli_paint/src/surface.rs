//! The drawing surface the face renders into

use crate::color::Color;
use crate::path::{Path, Point};
use crate::primitives::Size;

/// Post-processing filter applied to a layer when it is composited
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Filter {
    /// Glow around bright pixels
    Bloom {
        intensity: f32,
        threshold: f32,
        scale: f32,
    },
}

impl Filter {
    pub const fn bloom(intensity: f32, threshold: f32, scale: f32) -> Self {
        Filter::Bloom {
            intensity,
            threshold,
            scale,
        }
    }
}

/// A 2D surface that supports masks, translations and filtered layers.
///
/// Push/pop calls must be balanced within a frame.
pub trait Surface {
    /// Drawable size in pixels
    fn size(&self) -> Size;

    /// Clear the whole surface to a solid color
    fn clear(&mut self, color: Color);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    fn fill_path(&mut self, path: &Path, color: Color);

    /// Restrict drawing to the inside of `path` until the matching pop
    fn push_mask(&mut self, path: &Path);

    fn pop_mask(&mut self);

    fn push_translate(&mut self, dx: f32, dy: f32);

    fn pop_transform(&mut self);

    /// Start an offscreen layer composited with `filter` on pop
    fn push_layer(&mut self, filter: Option<Filter>);

    fn pop_layer(&mut self);
}
