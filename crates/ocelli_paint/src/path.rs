//! Path building, flattening and hit testing

use crate::primitives::Rect;
use smallvec::SmallVec;
use std::f32::consts::TAU;

/// Segments used to flatten a full circle.
const SEGMENTS_PER_TURN: f32 = 48.0;

/// A 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Path command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Circular arc; a line joins the current point to the arc start.
    /// Positive sweep runs clockwise on a y-down surface.
    Arc {
        center: Point,
        radius: f32,
        start_angle: f32,
        sweep_angle: f32,
    },
    Close,
}

/// A 2D path composed of commands
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: SmallVec<[PathCommand; 8]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Axis-aligned rectangle as a closed polygon
    pub fn rect(rect: Rect) -> Self {
        PathBuilder::new()
            .move_to(rect.x, rect.y)
            .line_to(rect.right(), rect.y)
            .line_to(rect.right(), rect.bottom())
            .line_to(rect.x, rect.bottom())
            .close()
            .build()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// The same path moved by `(dx, dy)`
    pub fn translated(&self, dx: f32, dy: f32) -> Path {
        let commands = self
            .commands
            .iter()
            .map(|command| match *command {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(p.offset(dx, dy)),
                PathCommand::LineTo(p) => PathCommand::LineTo(p.offset(dx, dy)),
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    sweep_angle,
                } => PathCommand::Arc {
                    center: center.offset(dx, dy),
                    radius,
                    start_angle,
                    sweep_angle,
                },
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        Path { commands }
    }

    /// Flatten into closed polygons, one per subpath.
    pub fn flatten(&self) -> Vec<Vec<Point>> {
        let mut polygons = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    if current.len() > 2 {
                        polygons.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(p);
                }
                PathCommand::LineTo(p) => current.push(p),
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    sweep_angle,
                } => {
                    let turns = sweep_angle.abs() / TAU;
                    let steps = (turns * SEGMENTS_PER_TURN).ceil().max(1.0) as usize;
                    for i in 0..=steps {
                        let angle = start_angle + sweep_angle * (i as f32 / steps as f32);
                        current.push(Point::new(
                            center.x + radius * angle.cos(),
                            center.y + radius * angle.sin(),
                        ));
                    }
                }
                PathCommand::Close => {
                    if current.len() > 2 {
                        polygons.push(std::mem::take(&mut current));
                    }
                    current.clear();
                }
            }
        }
        if current.len() > 2 {
            polygons.push(current);
        }
        polygons
    }

    /// Even-odd containment test against the flattened path
    pub fn contains(&self, point: Point) -> bool {
        let mut inside = false;
        for polygon in self.flatten() {
            let mut j = polygon.len() - 1;
            for i in 0..polygon.len() {
                let (a, b) = (polygon[i], polygon[j]);
                if (a.y > point.y) != (b.y > point.y)
                    && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
                {
                    inside = !inside;
                }
                j = i;
            }
        }
        inside
    }

    /// Bounding box of the flattened path
    pub fn bounds(&self) -> Option<Rect> {
        let points: Vec<Point> = self.flatten().into_iter().flatten().collect();
        let first = *points.first()?;
        let (min, max) = points.iter().fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Rect::from_points(min, max))
    }
}

/// Builder for constructing paths
pub struct PathBuilder {
    path: Path,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self { path: Path::new() }
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.path
            .commands
            .push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.path
            .commands
            .push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    /// Canvas-style arc from `start` to `end` radians.
    ///
    /// Clockwise arcs wrap `end` forward past `start`, anticlockwise arcs wrap
    /// it backward, and a sweep never exceeds one full turn.
    pub fn arc(
        mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start: f32,
        end: f32,
        anticlockwise: bool,
    ) -> Self {
        let mut sweep = end - start;
        if anticlockwise {
            if sweep > 0.0 {
                sweep -= TAU * (sweep / TAU).ceil();
            }
            sweep = sweep.max(-TAU);
        } else {
            if sweep < 0.0 {
                sweep += TAU * (-sweep / TAU).ceil();
            }
            sweep = sweep.min(TAU);
        }
        self.path.commands.push(PathCommand::Arc {
            center: Point::new(cx, cy),
            radius,
            start_angle: start,
            sweep_angle: sweep,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.path.commands.push(PathCommand::Close);
        self
    }

    pub fn build(self) -> Path {
        self.path
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}
