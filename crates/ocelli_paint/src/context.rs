//! Paint context - a recording surface
//!
//! Captures every draw call of a frame as a [`PaintCommand`] list. Tests and
//! headless runs read the list back, or ask which circles survive the active
//! masks with [`PaintContext::visible_circles`].

use crate::color::Color;
use crate::path::{Path, Point};
use crate::primitives::*;
use crate::surface::{Filter, Surface};

/// 2D affine transform
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    /// [a, b, c, d, tx, ty]
    pub elements: [f32; 6],
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            elements: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    /// Compose: apply `self` first, then `other`.
    pub fn then(&self, other: &Transform2D) -> Transform2D {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = other.elements;
        Transform2D {
            elements: [
                a1 * a2 + b1 * c2,
                a1 * b2 + b1 * d2,
                c1 * a2 + d1 * c2,
                c1 * b2 + d1 * d2,
                tx1 * a2 + ty1 * c2 + tx2,
                tx1 * b2 + ty1 * d2 + ty2,
            ],
        }
    }

    pub fn apply(&self, point: Point) -> Point {
        let [a, b, c, d, tx, ty] = self.elements;
        Point::new(a * point.x + c * point.y + tx, b * point.x + d * point.y + ty)
    }

    /// Translation part only; the face never rotates or scales.
    pub fn offset(&self) -> (f32, f32) {
        (self.elements[4], self.elements[5])
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A recorded draw call
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    Clear(Color),
    FillCircle { circle: Circle, color: Color },
    FillPath { path: Path, color: Color },
    PushMask { path: Path },
    PopMask,
    PushTransform { transform: Transform2D },
    PopTransform,
    PushLayer { filter: Option<Filter> },
    PopLayer,
}

/// A circle that ended up on screen, in surface coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleCircle {
    pub circle: Circle,
    pub color: Color,
}

/// Recording paint context
pub struct PaintContext {
    size: Size,
    commands: Vec<PaintCommand>,
}

impl PaintContext {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the context empty for the next frame
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Replay the recording and return every filled circle whose center lies
    /// inside all masks active when it was drawn.
    ///
    /// Masks and circles are resolved to surface coordinates using the
    /// transform stack at the time they were pushed or drawn.
    pub fn visible_circles(&self) -> Vec<VisibleCircle> {
        let mut transforms = vec![Transform2D::IDENTITY];
        let mut masks: Vec<Path> = Vec::new();
        let mut visible = Vec::new();

        for command in &self.commands {
            let current = transforms.last().copied().unwrap_or_default();
            match command {
                PaintCommand::Clear(_) => visible.clear(),
                PaintCommand::FillCircle { circle, color } => {
                    let center = current.apply(circle.center);
                    if masks.iter().all(|mask| mask.contains(center)) {
                        visible.push(VisibleCircle {
                            circle: Circle::new(center, circle.radius),
                            color: *color,
                        });
                    }
                }
                PaintCommand::PushMask { path } => {
                    let (dx, dy) = current.offset();
                    masks.push(path.translated(dx, dy));
                }
                PaintCommand::PopMask => {
                    masks.pop();
                }
                PaintCommand::PushTransform { transform } => {
                    transforms.push(transform.then(&current));
                }
                PaintCommand::PopTransform => {
                    if transforms.len() > 1 {
                        transforms.pop();
                    }
                }
                PaintCommand::FillPath { .. }
                | PaintCommand::PushLayer { .. }
                | PaintCommand::PopLayer => {}
            }
        }
        visible
    }

    /// Number of mask pushes in the recording
    pub fn mask_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::PushMask { .. }))
            .count()
    }

    /// Whether every push has a matching pop of the same kind
    pub fn is_balanced(&self) -> bool {
        let mut stack = Vec::new();
        for command in &self.commands {
            match command {
                PaintCommand::PushMask { .. } => stack.push(0u8),
                PaintCommand::PushTransform { .. } => stack.push(1),
                PaintCommand::PushLayer { .. } => stack.push(2),
                PaintCommand::PopMask if stack.pop() != Some(0) => return false,
                PaintCommand::PopTransform if stack.pop() != Some(1) => return false,
                PaintCommand::PopLayer if stack.pop() != Some(2) => return false,
                _ => {}
            }
        }
        stack.is_empty()
    }
}

impl Surface for PaintContext {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(PaintCommand::Clear(color));
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(PaintCommand::FillCircle {
            circle: Circle::new(center, radius),
            color,
        });
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        self.commands.push(PaintCommand::FillPath {
            path: path.clone(),
            color,
        });
    }

    fn push_mask(&mut self, path: &Path) {
        self.commands.push(PaintCommand::PushMask { path: path.clone() });
    }

    fn pop_mask(&mut self) {
        self.commands.push(PaintCommand::PopMask);
    }

    fn push_translate(&mut self, dx: f32, dy: f32) {
        self.commands.push(PaintCommand::PushTransform {
            transform: Transform2D::translate(dx, dy),
        });
    }

    fn pop_transform(&mut self) {
        self.commands.push(PaintCommand::PopTransform);
    }

    fn push_layer(&mut self, filter: Option<Filter>) {
        if let Some(Filter::Bloom { intensity, .. }) = filter {
            tracing::trace!(intensity, "bloom layer");
        }
        self.commands.push(PaintCommand::PushLayer { filter });
    }

    fn pop_layer(&mut self) {
        self.commands.push(PaintCommand::PopLayer);
    }
}
