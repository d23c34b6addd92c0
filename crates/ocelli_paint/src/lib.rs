//! Ocelli Paint API
//!
//! A small 2D drawing API for procedural graphics.
//!
//! # Features
//!
//! - Path drawing (lines, arcs) with flattening and hit testing
//! - Shape primitives (rect, circle)
//! - Compositing masks, translations and filtered layers
//! - A recording surface that captures a frame as paint commands

pub mod color;
pub mod context;
pub mod path;
pub mod primitives;
pub mod surface;

pub use color::Color;
pub use context::{PaintCommand, PaintContext, Transform2D, VisibleCircle};
pub use path::{Path, PathBuilder, PathCommand, Point};
pub use primitives::*;
pub use surface::{Filter, Surface};
