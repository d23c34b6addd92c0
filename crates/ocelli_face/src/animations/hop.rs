use super::step_until;
use crate::eye::EyeSide;
use crate::state::FaceState;
use ocelli_animation::{Animation, AnimationError, Easing, Step, Tween};

/// One elastic vertical hop, used by focus.
///
/// The containers jump up by `0.3R` and spring back to where they started
/// with a single damped overshoot.
pub struct Hop {
    start_y: f32,
    height: f32,
    tween: Tween,
}

impl Hop {
    pub fn new(state: &FaceState, duration_ms: f32) -> Self {
        Self {
            start_y: state.scene.container_offset(EyeSide::Left),
            height: state.eyes.radius() * 0.3,
            tween: Tween::unit(duration_ms, Easing::ElasticOut),
        }
    }
}

impl Animation<FaceState> for Hop {
    fn name(&self) -> &'static str {
        "hop"
    }

    fn step(&mut self, state: &mut FaceState, dt_ms: f32) -> Result<Step, AnimationError> {
        let jump = self.tween.advance(dt_ms)?;
        state.scene.set_offsets(self.start_y - self.height * (1.0 - jump))?;
        Ok(step_until(self.tween.is_finished()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocelli_paint::Size;

    #[test]
    fn test_hop_lands_where_it_started() {
        let mut state = FaceState::new(Size::new(1000.0, 500.0));
        let mut hop = Hop::new(&state, 1500.0);

        hop.step(&mut state, 0.0).unwrap();
        assert!((state.scene.container_offset(EyeSide::Left) + 30.0).abs() < 1e-3);

        let mut result = Step::Running;
        while result == Step::Running {
            result = hop.step(&mut state, 16.0).unwrap();
        }
        assert!(state.scene.container_offset(EyeSide::Right).abs() < 1e-4);
    }
}
