//! Elapsed-time tweens
//!
//! A tween accumulates wall time, not frames: progress is
//! `min(elapsed / duration, 1)`, the easing curve is applied to that progress,
//! and the result linearly interpolates between the start and end values.

use crate::easing::Easing;
use crate::error::{check_delta, AnimationError};

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Split `elapsed_ms` into equal stages of `stage_ms`.
///
/// Returns the stage index (clamped to `stages - 1`) and the raw progress
/// inside that stage. Progress in the last stage may exceed 1.0 while the
/// caller holds it.
pub fn stage_at(elapsed_ms: f32, stage_ms: f32, stages: usize) -> (usize, f32) {
    if stages == 0 || stage_ms <= 0.0 {
        return (stages.saturating_sub(1), 1.0);
    }
    let index = ((elapsed_ms / stage_ms).floor() as usize).min(stages - 1);
    let local = (elapsed_ms - index as f32 * stage_ms) / stage_ms;
    (index, local)
}

/// A single timed interpolation between two values
#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            elapsed_ms: 0.0,
            easing,
        }
    }

    /// A normalized tween (0 → 1) for driving several values off one clock.
    pub fn unit(duration_ms: f32, easing: Easing) -> Self {
        Self::new(0.0, 1.0, duration_ms, easing)
    }

    /// Advance by `dt_ms` and return the new interpolated value.
    pub fn advance(&mut self, dt_ms: f32) -> Result<f32, AnimationError> {
        let dt_ms = check_delta(dt_ms)?;
        self.elapsed_ms += dt_ms;
        Ok(self.value())
    }

    /// Raw progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).min(1.0)
    }

    /// Progress after the easing curve.
    pub fn eased(&self) -> f32 {
        self.easing.apply(self.progress())
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        lerp(self.from, self.to, self.eased())
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_tween_interpolates() {
        let mut tween = Tween::new(10.0, 20.0, 100.0, Easing::Linear);
        assert_eq!(tween.value(), 10.0);

        let v = tween.advance(25.0).unwrap();
        assert!((v - 12.5).abs() < 1e-5);

        tween.advance(75.0).unwrap();
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 20.0);
    }

    #[test]
    fn test_progress_clamps_past_duration() {
        let mut tween = Tween::unit(100.0, Easing::EaseInOutCubic);
        tween.advance(250.0).unwrap();
        assert_eq!(tween.progress(), 1.0);
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn test_zero_duration_is_immediately_finished() {
        let tween = Tween::new(0.0, 5.0, 0.0, Easing::Linear);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 5.0);
    }

    #[test]
    fn test_invalid_delta_is_rejected() {
        let mut tween = Tween::unit(100.0, Easing::Linear);
        assert!(matches!(
            tween.advance(f32::NAN),
            Err(AnimationError::InvalidDelta(_))
        ));
        assert_eq!(
            tween.advance(-1.0),
            Err(AnimationError::InvalidDelta(-1.0))
        );
        assert_eq!(tween.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_stage_at_splits_evenly() {
        assert_eq!(stage_at(0.0, 100.0, 3), (0, 0.0));
        let (index, local) = stage_at(150.0, 100.0, 3);
        assert_eq!(index, 1);
        assert!((local - 0.5).abs() < 1e-6);
        // Held in the final stage
        let (index, local) = stage_at(450.0, 100.0, 3);
        assert_eq!(index, 2);
        assert!(local > 1.0);
    }
}
