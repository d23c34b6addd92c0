use super::{step_until, FaceAnimation};
use crate::eye::EyeSide;
use crate::state::FaceState;
use ocelli_animation::{lerp, Animation, AnimationError, Easing, Step, Tween};
use ocelli_paint::Point;

/// Ease both eyes back to their origins
pub struct Recenter {
    from: [Point; 2],
    tween: Tween,
}

impl Recenter {
    /// `None` when both eyes already rest at their origins.
    pub fn new(state: &FaceState, duration_ms: f32) -> Option<Self> {
        if state.eyes.at_origin() {
            return None;
        }
        Some(Self {
            from: state.eyes.centers(),
            tween: Tween::unit(duration_ms, Easing::EaseInOutCubic),
        })
    }

    pub fn boxed(state: &FaceState, duration_ms: f32) -> Option<FaceAnimation> {
        Self::new(state, duration_ms).map(|r| Box::new(r) as FaceAnimation)
    }
}

impl Animation<FaceState> for Recenter {
    fn name(&self) -> &'static str {
        "recenter"
    }

    fn step(&mut self, state: &mut FaceState, dt_ms: f32) -> Result<Step, AnimationError> {
        let t = self.tween.advance(dt_ms)?;
        for (side, from) in EyeSide::BOTH.into_iter().zip(self.from) {
            let eye = state.eyes.get_mut(side);
            eye.center = if self.tween.is_finished() {
                eye.origin
            } else {
                Point::new(lerp(from.x, eye.origin.x, t), lerp(from.y, eye.origin.y, t))
            };
        }
        Ok(step_until(self.tween.is_finished()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocelli_paint::Size;

    #[test]
    fn test_skipped_at_origin() {
        let state = FaceState::new(Size::new(400.0, 300.0));
        assert!(Recenter::new(&state, 300.0).is_none());
    }

    #[test]
    fn test_returns_exactly_to_origin() {
        let mut state = FaceState::new(Size::new(400.0, 300.0));
        state.eyes.get_mut(EyeSide::Left).center.x += 10.0;
        state.eyes.get_mut(EyeSide::Right).center.y -= 7.0;

        let mut recenter = Recenter::new(&state, 300.0).unwrap();
        assert_eq!(recenter.step(&mut state, 150.0), Ok(Step::Running));
        assert!(!state.eyes.at_origin());
        assert_eq!(recenter.step(&mut state, 150.0), Ok(Step::Finished));
        assert!(state.eyes.at_origin());
    }
}
