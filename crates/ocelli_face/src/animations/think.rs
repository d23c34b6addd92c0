use super::recenter::Recenter;
use crate::eye::EyeSide;
use crate::state::FaceState;
use ocelli_animation::error::check_delta;
use ocelli_animation::{Animation, AnimationError, Easing, Step};
use std::f32::consts::{PI, TAU};

/// Vertical offset of one eye while thinking.
///
/// `ramp` is the eased ramp-in progress scaling both amplitude and frequency;
/// the right eye runs half a period behind the left.
pub fn think_offset(
    elapsed_ms: f32,
    period_ms: f32,
    amplitude: f32,
    ramp: f32,
    side: EyeSide,
) -> f32 {
    let mut phase = elapsed_ms / period_ms * TAU * ramp;
    if side == EyeSide::Right {
        phase += PI;
    }
    let wave = phase.sin().max(0.0);
    3.0 * amplitude * ramp * wave * wave
}

/// Alternating eye bob, unbounded until the thinking flag clears
pub struct ThinkBob {
    elapsed_ms: f32,
    ramp_ms: f32,
    period_ms: f32,
    recenter_ms: f32,
    amplitude: f32,
}

impl ThinkBob {
    pub fn new(radius: f32, ramp_ms: f32, period_ms: f32, recenter_ms: f32) -> Self {
        Self {
            elapsed_ms: 0.0,
            ramp_ms,
            period_ms,
            recenter_ms,
            amplitude: radius * 0.5,
        }
    }
}

impl Animation<FaceState> for ThinkBob {
    fn name(&self) -> &'static str {
        "think_bob"
    }

    fn is_active(&self, state: &FaceState) -> bool {
        state.flags.thinking
    }

    fn step(&mut self, state: &mut FaceState, dt_ms: f32) -> Result<Step, AnimationError> {
        self.elapsed_ms += check_delta(dt_ms)?;
        if self.elapsed_ms >= self.ramp_ms {
            // full ramp: the bob is periodic from here on
            self.elapsed_ms =
                self.ramp_ms + (self.elapsed_ms - self.ramp_ms).rem_euclid(self.period_ms);
        }
        let ramp = Easing::EaseInOutCubic.apply((self.elapsed_ms / self.ramp_ms).min(1.0));
        for side in EyeSide::BOTH {
            let eye = state.eyes.get_mut(side);
            let offset = think_offset(self.elapsed_ms, self.period_ms, self.amplitude, ramp, side);
            eye.center.y = eye.origin.y + offset;
        }
        Ok(Step::Running)
    }

    /// Hands over to a recenter so the eyes settle back to rest.
    fn teardown(&mut self, state: &mut FaceState) -> Option<Box<dyn Animation<FaceState>>> {
        Recenter::boxed(state, self.recenter_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocelli_paint::Size;

    #[test]
    fn test_eyes_alternate() {
        // quarter period: left at its crest, right in its rest half
        let left = think_offset(375.0, 1500.0, 10.0, 1.0, EyeSide::Left);
        let right = think_offset(375.0, 1500.0, 10.0, 1.0, EyeSide::Right);
        assert!((left - 30.0).abs() < 1e-3);
        assert_eq!(right, 0.0);
    }

    #[test]
    fn test_no_motion_before_ramp() {
        assert_eq!(think_offset(200.0, 1500.0, 10.0, 0.0, EyeSide::Left), 0.0);
    }

    #[test]
    fn test_cancel_hands_over_to_recenter() {
        let mut state = FaceState::new(Size::new(400.0, 400.0));
        state.flags.thinking = true;
        let mut bob = ThinkBob::new(state.eyes.radius(), 500.0, 1500.0, 300.0);
        bob.step(&mut state, 600.0).unwrap();
        assert!(!state.eyes.at_origin());

        state.flags.thinking = false;
        assert!(!bob.is_active(&state));
        let follow_up = bob.teardown(&mut state).unwrap();
        assert_eq!(follow_up.name(), "recenter");
    }

    #[test]
    fn test_long_think_stays_in_one_period() {
        let mut state = FaceState::new(Size::new(400.0, 400.0));
        state.flags.thinking = true;
        let mut bob = ThinkBob::new(state.eyes.radius(), 500.0, 1500.0, 300.0);
        bob.step(&mut state, 200.0).unwrap();
        assert_eq!(bob.elapsed_ms, 200.0);

        // 500 ramp + 100 periods + a quarter period
        bob.step(&mut state, 300.0 + 150_000.0 + 375.0).unwrap();
        assert!(bob.elapsed_ms >= 500.0 && bob.elapsed_ms < 2000.0);
        let left = state.eyes.get(EyeSide::Left);
        let expected = think_offset(875.0, 1500.0, bob.amplitude, 1.0, EyeSide::Left);
        assert!((left.center.y - left.origin.y - expected).abs() < 1e-2);

        let mut seen = Vec::new();
        for _ in 0..100 {
            bob.step(&mut state, 16.0).unwrap();
            seen.push(state.eyes.get(EyeSide::Left).center.y);
        }
        seen.dedup();
        assert!(seen.len() > 10);
    }
}
