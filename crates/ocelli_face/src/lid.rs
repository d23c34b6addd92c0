//! Lid mask geometry
//!
//! A lid mask is a "keep" region: dots inside the shape are drawn, everything
//! else in the eye is occluded. Shapes are parametric and rebuilt into a path
//! from the eye's current center each frame.

use crate::eye::EyeState;
use ocelli_paint::{Path, PathBuilder, Rect};
use std::f32::consts::PI;

/// Inner radius ratio of the finished smile crescent
pub const SMILE_INNER_RATIO: f32 = 0.8;

/// Height of the held-shut line during a blink
pub const BLINK_LINE_HEIGHT: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LidShape {
    /// Horizontal band spanning the eye between two absolute y positions.
    /// The edges may cross while closing; the band covers whatever lies
    /// between them.
    Band { top: f32, bottom: f32 },
    /// Upper half-disc plus the lower arc from `progress·π` to `π`.
    /// At 0 this is the whole disc, at 1 only the upper half.
    SmileWedge { progress: f32 },
    /// Upper half-disc with a concentric inner half-disc carved out
    SmileCrescent { inner_ratio: f32 },
}

impl LidShape {
    /// Sleep lid: the top edge travels `y−R → y+0.8R` and the bottom edge
    /// `y+R → y+0.2R` as `eased` goes 0 → 1.
    pub fn sleep(origin_y: f32, radius: f32, eased: f32) -> Self {
        LidShape::Band {
            top: origin_y - radius + radius * 1.8 * eased,
            bottom: origin_y + radius - radius * 0.8 * eased,
        }
    }

    /// Blink lid closing toward the center line
    pub fn blink_closing(origin_y: f32, radius: f32, eased: f32) -> Self {
        LidShape::Band {
            top: origin_y - radius + radius * eased,
            bottom: origin_y + radius - radius * eased,
        }
    }

    /// Thin line held while the blink is shut
    pub fn blink_line(origin_y: f32) -> Self {
        LidShape::Band {
            top: origin_y - BLINK_LINE_HEIGHT / 2.0,
            bottom: origin_y + BLINK_LINE_HEIGHT / 2.0,
        }
    }

    /// Blink lid reopening from the center line
    pub fn blink_opening(origin_y: f32, radius: f32, eased: f32) -> Self {
        LidShape::Band {
            top: origin_y - eased * radius,
            bottom: origin_y + eased * radius,
        }
    }

    /// Crescent carved while the smile deepens; `progress` 0 → 1 shrinks the
    /// inner radius from R to 0.8R.
    pub fn smile_crescent(progress: f32) -> Self {
        LidShape::SmileCrescent {
            inner_ratio: 1.0 - progress * (1.0 - SMILE_INNER_RATIO),
        }
    }

    /// Build the mask path around `eye`.
    pub fn path(&self, eye: &EyeState) -> Path {
        let (cx, cy, r) = (eye.center.x, eye.center.y, eye.radius);
        match *self {
            LidShape::Band { top, bottom } => Path::rect(Rect::new(
                cx - r,
                top.min(bottom),
                r * 2.0,
                (bottom - top).abs(),
            )),
            LidShape::SmileWedge { progress } => PathBuilder::new()
                .arc(cx, cy, r, PI, PI * 2.0, false)
                .arc(cx, cy, r, progress * PI, PI, false)
                .close()
                .build(),
            LidShape::SmileCrescent { inner_ratio } => PathBuilder::new()
                .arc(cx, cy, r, PI, PI * 2.0, false)
                .arc(cx, cy, r * inner_ratio, PI * 2.0, PI, true)
                .close()
                .build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocelli_paint::Point;

    fn eye() -> EyeState {
        EyeState::new(Point::new(100.0, 100.0), 50.0)
    }

    #[test]
    fn test_sleep_lid_ends_in_slit() {
        let LidShape::Band { top, bottom } = LidShape::sleep(100.0, 50.0, 1.0) else {
            panic!("expected band");
        };
        assert!((top - 140.0).abs() < 1e-4);
        assert!((bottom - 110.0).abs() < 1e-4);

        let path = LidShape::sleep(100.0, 50.0, 1.0).path(&eye());
        assert!(path.contains(Point::new(100.0, 125.0)));
        assert!(!path.contains(Point::new(100.0, 100.0)));
        assert!(!path.contains(Point::new(100.0, 145.0)));
    }

    #[test]
    fn test_open_band_covers_eye() {
        let path = LidShape::sleep(100.0, 50.0, 0.0).path(&eye());
        assert!(path.contains(Point::new(100.0, 60.0)));
        assert!(path.contains(Point::new(100.0, 140.0)));
    }

    #[test]
    fn test_blink_line_is_thin() {
        let path = LidShape::blink_line(100.0).path(&eye());
        assert!(path.contains(Point::new(100.0, 101.0)));
        assert!(!path.contains(Point::new(100.0, 103.0)));
    }

    #[test]
    fn test_smile_wedge_sweeps_up() {
        let full = LidShape::SmileWedge { progress: 0.0 }.path(&eye());
        assert!(full.contains(Point::new(100.0, 140.0)));

        let upper = LidShape::SmileWedge { progress: 1.0 }.path(&eye());
        assert!(upper.contains(Point::new(100.0, 60.0)));
        assert!(!upper.contains(Point::new(100.0, 140.0)));
    }

    #[test]
    fn test_crescent_keeps_only_the_rim() {
        let path = LidShape::smile_crescent(1.0).path(&eye());
        // rim between 0.8R and R above the center
        assert!(path.contains(Point::new(100.0, 55.0)));
        assert!(!path.contains(Point::new(100.0, 80.0)));
        assert!(!path.contains(Point::new(100.0, 120.0)));
    }
}
