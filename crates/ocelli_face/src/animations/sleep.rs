use super::step_until;
use crate::eye::EyeSide;
use crate::lid::LidShape;
use crate::state::FaceState;
use ocelli_animation::error::check_delta;
use ocelli_animation::{Animation, AnimationError, Easing, Step, Tween};
use std::f32::consts::PI;

/// Vertical breathing offset `elapsed_ms` into the breathing loop.
///
/// Each period is a half-sine bump over its first half and rest over the
/// second, so the offset is 0 at the start and end of every bump and peaks
/// at `amplitude` halfway through it.
pub fn breath_offset(elapsed_ms: f32, period_ms: f32, amplitude: f32) -> f32 {
    let half = period_ms / 2.0;
    let phase = elapsed_ms.rem_euclid(period_ms);
    if phase < half {
        (phase / half * PI).sin() * amplitude
    } else {
        0.0
    }
}

/// Close both lids to a narrow slit
pub struct SleepClose {
    origin_y: [f32; 2],
    radius: f32,
    tween: Tween,
}

impl SleepClose {
    pub fn new(state: &mut FaceState, duration_ms: f32) -> Self {
        let radius = state.eyes.radius();
        let origin_y = [
            state.eyes.get(EyeSide::Left).center.y,
            state.eyes.get(EyeSide::Right).center.y,
        ];
        for (side, y) in EyeSide::BOTH.into_iter().zip(origin_y) {
            state.scene.set_mask(side, LidShape::sleep(y, radius, 0.0));
        }
        Self {
            origin_y,
            radius,
            tween: Tween::unit(duration_ms, Easing::EaseInOutCubic),
        }
    }
}

impl Animation<FaceState> for SleepClose {
    fn name(&self) -> &'static str {
        "sleep_close"
    }

    fn is_active(&self, state: &FaceState) -> bool {
        state.flags.sleeping
    }

    fn step(&mut self, state: &mut FaceState, dt_ms: f32) -> Result<Step, AnimationError> {
        let eased = self.tween.advance(dt_ms)?;
        for (side, y) in EyeSide::BOTH.into_iter().zip(self.origin_y) {
            state.scene.set_mask(side, LidShape::sleep(y, self.radius, eased));
        }
        Ok(step_until(self.tween.is_finished()))
    }

    fn teardown(&mut self, state: &mut FaceState) -> Option<Box<dyn Animation<FaceState>>> {
        state.scene.clear_masks();
        None
    }
}

/// Unbounded breathing while asleep; stops as soon as the sleep flag clears
pub struct SleepBreath {
    elapsed_ms: f32,
    period_ms: f32,
    amplitude: f32,
}

impl SleepBreath {
    pub fn new(period_ms: f32, amplitude: f32) -> Self {
        Self {
            elapsed_ms: 0.0,
            period_ms,
            amplitude,
        }
    }
}

impl Animation<FaceState> for SleepBreath {
    fn name(&self) -> &'static str {
        "sleep_breath"
    }

    fn is_active(&self, state: &FaceState) -> bool {
        state.flags.sleeping
    }

    fn step(&mut self, state: &mut FaceState, dt_ms: f32) -> Result<Step, AnimationError> {
        self.elapsed_ms = (self.elapsed_ms + check_delta(dt_ms)?).rem_euclid(self.period_ms);
        let offset = breath_offset(self.elapsed_ms, self.period_ms, self.amplitude);
        state.scene.set_offsets(offset)?;
        Ok(Step::Running)
    }

    fn teardown(&mut self, state: &mut FaceState) -> Option<Box<dyn Animation<FaceState>>> {
        state.scene.clear_masks();
        if let Err(error) = state.scene.set_offsets(0.0) {
            tracing::warn!(%error, "could not reset container offsets");
        }
        None
    }
}
