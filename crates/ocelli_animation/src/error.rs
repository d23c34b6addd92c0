//! Errors raised by animation callbacks

use thiserror::Error;

/// A fault inside a single animation step.
///
/// The scheduler logs these and treats the tick as a no-op for the faulting
/// animation; they never stop the frame clock.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnimationError {
    /// The host fed a negative or non-finite frame delta.
    #[error("invalid frame delta: {0} ms")]
    InvalidDelta(f32),

    /// The state an animation drives has disappeared underneath it.
    #[error("animation `{animation}` lost its target: {target}")]
    MissingTarget {
        animation: &'static str,
        target: &'static str,
    },
}

/// Reject deltas that would corrupt accumulated elapsed time.
pub fn check_delta(dt_ms: f32) -> Result<f32, AnimationError> {
    if dt_ms.is_finite() && dt_ms >= 0.0 {
        Ok(dt_ms)
    } else {
        Err(AnimationError::InvalidDelta(dt_ms))
    }
}
