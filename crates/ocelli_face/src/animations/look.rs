use super::step_until;
use crate::eye::EyeSide;
use crate::state::FaceState;
use ocelli_animation::{lerp, Animation, AnimationError, Easing, Step, Tween};
use ocelli_paint::Point;

/// The four diagonals and center
pub const LOOK_DIRECTIONS: [(f32, f32); 5] = [
    (-1.0, -1.0),
    (1.0, -1.0),
    (-1.0, 1.0),
    (1.0, 1.0),
    (0.0, 0.0),
];

/// Idle glance toward `origin + direction·0.4R`. Does not return on its own.
///
/// Holds the blink lock while it runs.
pub struct LookAround {
    from: [Point; 2],
    to: [Point; 2],
    tween: Tween,
}

impl LookAround {
    pub fn new(state: &mut FaceState, direction: (f32, f32), duration_ms: f32) -> Self {
        state.flags.blink_lock = true;
        let range = state.eyes.radius() * 0.4;
        let target = |side| {
            let origin = state.eyes.get(side).origin;
            origin.offset(direction.0 * range, direction.1 * range)
        };
        let to = [target(EyeSide::Left), target(EyeSide::Right)];
        Self {
            from: state.eyes.centers(),
            to,
            tween: Tween::unit(duration_ms, Easing::EaseInOutCubic),
        }
    }

    fn release(state: &mut FaceState) {
        if !state.flags.on_animation {
            state.flags.blink_lock = false;
        }
    }
}

impl Animation<FaceState> for LookAround {
    fn name(&self) -> &'static str {
        "look_around"
    }

    fn step(&mut self, state: &mut FaceState, dt_ms: f32) -> Result<Step, AnimationError> {
        let t = self.tween.advance(dt_ms)?;
        for (i, side) in EyeSide::BOTH.into_iter().enumerate() {
            let (from, to) = (self.from[i], self.to[i]);
            state.eyes.get_mut(side).center =
                Point::new(lerp(from.x, to.x, t), lerp(from.y, to.y, t));
        }
        if self.tween.is_finished() {
            Self::release(state);
        }
        Ok(step_until(self.tween.is_finished()))
    }

    fn teardown(&mut self, state: &mut FaceState) -> Option<Box<dyn Animation<FaceState>>> {
        Self::release(state);
        None
    }
}
