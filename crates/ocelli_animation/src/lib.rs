//! Ocelli Animation Runtime
//!
//! Time-based procedural animation driven by a single frame clock.
//!
//! # Features
//!
//! - **Easing**: cubic and elastic curves mapping progress to eased progress
//! - **Tweens**: elapsed-time interpolation between two values
//! - **Scheduler**: per-frame animation callbacks with completion and
//!   level-triggered cancellation
//! - **Virtual Clock**: deterministic timers advanced by the host's frame delta

pub mod clock;
pub mod easing;
pub mod error;
pub mod scheduler;
pub mod tween;

pub use clock::{TimerId, VirtualClock};
pub use easing::Easing;
pub use error::AnimationError;
pub use scheduler::{Animation, AnimationId, AnimationScheduler, Step, TickEvent};
pub use tween::{lerp, stage_at, Tween};
