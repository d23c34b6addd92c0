use super::step_until;
use crate::state::FaceState;
use ocelli_animation::{stage_at, Animation, AnimationError, Easing, Step, Tween};

/// Dip both eye containers down and back, `cycles` times
pub struct Nod {
    tween: Tween,
    cycles: u32,
    distance: f32,
}

impl Nod {
    /// Each cycle travels `2R` down and back up.
    pub fn new(radius: f32, duration_ms: f32, cycles: u32) -> Self {
        Self {
            tween: Tween::unit(duration_ms, Easing::Linear),
            cycles: cycles.max(1),
            distance: radius * 2.0,
        }
    }

    /// Offset at the current elapsed time
    fn offset(&self) -> f32 {
        let stage_ms = self.tween.duration_ms() / self.cycles as f32;
        let (_, local) = stage_at(self.tween.elapsed_ms(), stage_ms, self.cycles as usize);
        let ease = Easing::EaseInOutCubic;
        if local <= 0.5 {
            ease.apply(local * 2.0) * self.distance
        } else {
            (1.0 - ease.apply(((local - 0.5) * 2.0).min(1.0))) * self.distance
        }
    }
}

impl Animation<FaceState> for Nod {
    fn name(&self) -> &'static str {
        "nod"
    }

    fn step(&mut self, state: &mut FaceState, dt_ms: f32) -> Result<Step, AnimationError> {
        self.tween.advance(dt_ms)?;
        let offset = if self.tween.is_finished() { 0.0 } else { self.offset() };
        state.scene.set_offsets(offset)?;
        Ok(step_until(self.tween.is_finished()))
    }

    fn teardown(&mut self, state: &mut FaceState) -> Option<Box<dyn Animation<FaceState>>> {
        if let Err(error) = state.scene.set_offsets(0.0) {
            tracing::warn!(%error, "could not reset container offsets");
        }
        None
    }
}
