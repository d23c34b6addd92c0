//! Ocelli Face
//!
//! A procedurally animated two-eye face that gives visual feedback for a
//! conversational agent. Hosts enqueue intent commands (nod, focus, sleep,
//! smile, think and their cancels); a dispatcher serializes them through an
//! expression state machine with explicit locks, and every frame redraws both
//! eyes as halftone dot fields clipped by geometric lid masks.
//!
//! # Example
//!
//! ```
//! use ocelli_face::{FaceConfig, FaceEngine};
//! use ocelli_paint::{Color, PaintContext, Size};
//!
//! let size = Size::new(800.0, 600.0);
//! let mut face = FaceEngine::new(
//!     FaceConfig::default(),
//!     size,
//!     Color::BLACK,
//!     Color::from_hex(0x3297a0),
//! )
//! .unwrap();
//! let mut surface = PaintContext::new(size);
//!
//! face.smile();
//! for _ in 0..200 {
//!     face.frame(16.0, &mut surface);
//! }
//! assert!(face.flags().smiling);
//! ```

pub mod animations;
pub mod background;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod dots;
pub mod engine;
pub mod error;
pub mod expression;
pub mod eye;
pub mod idle;
pub mod lid;
pub mod plan;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod timers;

pub use command::{AnimationCommand, AnimationQueue};
pub use config::{BackgroundConfig, BloomConfig, DotFieldConfig, FaceConfig, TimingConfig};
pub use dispatcher::Transition;
pub use engine::FaceEngine;
pub use error::FaceError;
pub use expression::{Expression, ExpressionFlags};
pub use eye::{EyeSide, EyeState};
pub use lid::LidShape;
pub use state::FaceState;
