//! Face engine errors

use thiserror::Error;

/// Errors raised while building a face or parsing its inputs.
///
/// Once running, the engine never returns errors: commands are accepted
/// unconditionally and per-frame faults are logged and skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FaceError {
    #[error("surface has no drawable area ({width}x{height})")]
    EmptySurface { width: f32, height: f32 },

    #[error("invalid face config: {0}")]
    InvalidConfig(String),

    #[error("unknown animation command `{0}`")]
    UnknownCommand(String),
}

pub type Result<T> = std::result::Result<T, FaceError>;
