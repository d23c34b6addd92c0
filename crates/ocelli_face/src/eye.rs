//! Per-eye position state

use ocelli_paint::{Point, Size};

/// Which eye
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EyeSide {
    Left,
    Right,
}

impl EyeSide {
    pub const BOTH: [EyeSide; 2] = [EyeSide::Left, EyeSide::Right];

    fn index(self) -> usize {
        match self {
            EyeSide::Left => 0,
            EyeSide::Right => 1,
        }
    }
}

/// Current and resting position of one eye
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeState {
    pub center: Point,
    /// Resting position, fixed for the engine's lifetime
    pub origin: Point,
    pub radius: f32,
}

impl EyeState {
    pub fn new(origin: Point, radius: f32) -> Self {
        Self {
            center: origin,
            origin,
            radius,
        }
    }

    pub fn at_origin(&self) -> bool {
        self.center == self.origin
    }

    /// Offset of the current center from the origin
    pub fn displacement(&self) -> (f32, f32) {
        (self.center.x - self.origin.x, self.center.y - self.origin.y)
    }
}

/// Both eyes, laid out on a surface
#[derive(Clone, Debug, PartialEq)]
pub struct Eyes {
    eyes: [EyeState; 2],
}

impl Eyes {
    /// Radius is a tenth of the width; origins sit at 30% height, 30% and
    /// 70% across.
    pub fn layout(size: Size) -> Self {
        let radius = size.width * 0.1;
        let y = size.height * 0.3;
        Self {
            eyes: [
                EyeState::new(Point::new(size.width * 0.3, y), radius),
                EyeState::new(Point::new(size.width * 0.7, y), radius),
            ],
        }
    }

    pub fn get(&self, side: EyeSide) -> &EyeState {
        &self.eyes[side.index()]
    }

    pub fn get_mut(&mut self, side: EyeSide) -> &mut EyeState {
        &mut self.eyes[side.index()]
    }

    /// Shared eye radius
    pub fn radius(&self) -> f32 {
        self.eyes[0].radius
    }

    pub fn at_origin(&self) -> bool {
        self.eyes.iter().all(EyeState::at_origin)
    }

    pub fn centers(&self) -> [Point; 2] {
        [self.eyes[0].center, self.eyes[1].center]
    }

    pub fn iter(&self) -> impl Iterator<Item = (EyeSide, &EyeState)> {
        EyeSide::BOTH.into_iter().zip(self.eyes.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let eyes = Eyes::layout(Size::new(800.0, 600.0));
        assert_eq!(eyes.radius(), 80.0);
        assert_eq!(eyes.get(EyeSide::Left).origin, Point::new(240.0, 180.0));
        assert_eq!(eyes.get(EyeSide::Right).origin, Point::new(560.0, 180.0));
        assert!(eyes.at_origin());
    }

    #[test]
    fn test_displacement() {
        let mut eyes = Eyes::layout(Size::new(100.0, 100.0));
        eyes.get_mut(EyeSide::Right).center.x += 4.0;
        assert_eq!(eyes.get(EyeSide::Right).displacement(), (4.0, 0.0));
        assert!(!eyes.at_origin());
    }
}
