use super::step_until;
use crate::lid::{LidShape, SMILE_INNER_RATIO};
use crate::state::FaceState;
use ocelli_animation::error::check_delta;
use ocelli_animation::{stage_at, Animation, AnimationError, Step};

const STAGES: usize = 3;

/// Three equal stages: sweep the wedge up, carve the crescent, hold.
pub struct Smile {
    elapsed_ms: f32,
    duration_ms: f32,
}

impl Smile {
    pub fn new(state: &mut FaceState, duration_ms: f32) -> Self {
        state.scene.set_masks(LidShape::SmileWedge { progress: 0.0 });
        Self {
            elapsed_ms: 0.0,
            duration_ms,
        }
    }
}

impl Animation<FaceState> for Smile {
    fn name(&self) -> &'static str {
        "smile"
    }

    fn step(&mut self, state: &mut FaceState, dt_ms: f32) -> Result<Step, AnimationError> {
        self.elapsed_ms += check_delta(dt_ms)?;
        let (stage, local) = stage_at(self.elapsed_ms, self.duration_ms / STAGES as f32, STAGES);
        let shape = match stage {
            0 => LidShape::SmileWedge { progress: local },
            1 => LidShape::smile_crescent(local),
            _ => LidShape::SmileCrescent {
                inner_ratio: SMILE_INNER_RATIO,
            },
        };
        state.scene.set_masks(shape);
        Ok(step_until(self.elapsed_ms >= self.duration_ms))
    }
}

/// Play the smile backwards, then destroy the masks.
///
/// Eyes without a smile mask stay unmasked.
pub struct CancelSmile {
    elapsed_ms: f32,
    duration_ms: f32,
}

impl CancelSmile {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            elapsed_ms: 0.0,
            duration_ms,
        }
    }
}

impl Animation<FaceState> for CancelSmile {
    fn name(&self) -> &'static str {
        "cancel_smile"
    }

    fn step(&mut self, state: &mut FaceState, dt_ms: f32) -> Result<Step, AnimationError> {
        self.elapsed_ms += check_delta(dt_ms)?;
        let (stage, local) = stage_at(self.elapsed_ms, self.duration_ms / STAGES as f32, STAGES);
        match stage {
            0 => state.scene.update_masks(LidShape::smile_crescent(1.0 - local)),
            1 => state.scene.update_masks(LidShape::SmileWedge {
                progress: 1.0 - local,
            }),
            _ => {
                state.scene.clear_masks();
                return Ok(Step::Finished);
            }
        }
        Ok(Step::Running)
    }

    fn teardown(&mut self, state: &mut FaceState) -> Option<Box<dyn Animation<FaceState>>> {
        state.scene.clear_masks();
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eye::EyeSide;
    use ocelli_paint::Size;

    #[test]
    fn test_smile_stages() {
        let mut state = FaceState::new(Size::new(600.0, 400.0));
        let mut smile = Smile::new(&mut state, 900.0);
        assert_eq!(state.scene.mask_count(), 2);

        smile.step(&mut state, 150.0).unwrap();
        assert_eq!(
            state.scene.mask(EyeSide::Left),
            Some(LidShape::SmileWedge { progress: 0.5 })
        );

        smile.step(&mut state, 300.0).unwrap();
        assert_eq!(state.scene.mask(EyeSide::Right), Some(LidShape::smile_crescent(0.5)));

        assert_eq!(smile.step(&mut state, 450.0), Ok(Step::Finished));
        assert_eq!(
            state.scene.mask(EyeSide::Left),
            Some(LidShape::SmileCrescent {
                inner_ratio: SMILE_INNER_RATIO
            })
        );
    }

    #[test]
    fn test_cancel_smile_destroys_masks() {
        let mut state = FaceState::new(Size::new(600.0, 400.0));
        state.scene.set_masks(LidShape::smile_crescent(1.0));
        let mut cancel = CancelSmile::new(600.0);

        assert_eq!(cancel.step(&mut state, 100.0), Ok(Step::Running));
        assert_eq!(state.scene.mask(EyeSide::Left), Some(LidShape::smile_crescent(0.5)));
        assert_eq!(cancel.step(&mut state, 200.0), Ok(Step::Running));
        assert_eq!(cancel.step(&mut state, 100.0), Ok(Step::Finished));
        assert_eq!(state.scene.mask_count(), 0);
    }

    #[test]
    fn test_cancel_without_smile_adds_nothing() {
        let mut state = FaceState::new(Size::new(600.0, 400.0));
        let mut cancel = CancelSmile::new(300.0);
        cancel.step(&mut state, 50.0).unwrap();
        assert_eq!(state.scene.mask_count(), 0);
    }
}
