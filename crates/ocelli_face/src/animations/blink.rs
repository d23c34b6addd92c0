use crate::eye::EyeSide;
use crate::lid::LidShape;
use crate::state::FaceState;
use ocelli_animation::error::check_delta;
use ocelli_animation::{Animation, AnimationError, Easing, Step};

/// Idle blink: close over the first 40%, hold a thin line for 20%, reopen
/// over the last 40%.
///
/// Holds the look-around lock while it runs.
pub struct Blink {
    elapsed_ms: f32,
    close_ms: f32,
    line_ms: f32,
    open_ms: f32,
    origin_y: [f32; 2],
    radius: f32,
}

impl Blink {
    pub fn new(state: &mut FaceState, duration_ms: f32) -> Self {
        state.flags.look_around_lock = true;
        state.scene.clear_masks();
        Self {
            elapsed_ms: 0.0,
            close_ms: duration_ms * 0.4,
            line_ms: duration_ms * 0.2,
            open_ms: duration_ms * 0.4,
            origin_y: [
                state.eyes.get(EyeSide::Left).center.y,
                state.eyes.get(EyeSide::Right).center.y,
            ],
            radius: state.eyes.radius(),
        }
    }

    pub fn duration_ms(&self) -> f32 {
        self.close_ms + self.line_ms + self.open_ms
    }

    fn shape(&self, origin_y: f32) -> LidShape {
        let ease = Easing::EaseInOutCubic;
        let t = self.elapsed_ms;
        if t <= self.close_ms {
            LidShape::blink_closing(origin_y, self.radius, ease.apply(t / self.close_ms))
        } else if t <= self.close_ms + self.line_ms {
            LidShape::blink_line(origin_y)
        } else {
            let opened = (t - self.close_ms - self.line_ms) / self.open_ms;
            LidShape::blink_opening(origin_y, self.radius, ease.apply(opened.min(1.0)))
        }
    }

    fn release(&self, state: &mut FaceState) {
        if !state.flags.is_exclusive() {
            state.scene.clear_masks();
        }
        if !state.flags.on_animation {
            state.flags.look_around_lock = false;
        }
    }
}

impl Animation<FaceState> for Blink {
    fn name(&self) -> &'static str {
        "blink"
    }

    fn step(&mut self, state: &mut FaceState, dt_ms: f32) -> Result<Step, AnimationError> {
        self.elapsed_ms += check_delta(dt_ms)?;
        if self.elapsed_ms >= self.duration_ms() {
            self.release(state);
            return Ok(Step::Finished);
        }
        for (side, y) in EyeSide::BOTH.into_iter().zip(self.origin_y) {
            state.scene.set_mask(side, self.shape(y));
        }
        Ok(Step::Running)
    }

    fn teardown(&mut self, state: &mut FaceState) -> Option<Box<dyn Animation<FaceState>>> {
        self.release(state);
        None
    }
}
