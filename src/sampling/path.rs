use std::fmt;

use crate::math::Point2;
use crate::model::Trajectory;

use super::{segments, HandleResolver, Segment};

/// One drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point2),
    LineTo(Point2),
    CubicTo {
        ctrl1: Point2,
        ctrl2: Point2,
        to: Point2,
    },
}

/// Drawing commands for a whole trajectory.
///
/// Formats as SVG path data (`M x y L x y C x1 y1 x2 y2 x y`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match command {
                PathCommand::MoveTo(p) => write!(f, "M {} {}", p.x, p.y)?,
                PathCommand::LineTo(p) => write!(f, "L {} {}", p.x, p.y)?,
                PathCommand::CubicTo { ctrl1, ctrl2, to } => write!(
                    f,
                    "C {} {} {} {} {} {}",
                    ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
                )?,
            }
        }
        Ok(())
    }
}

/// Builds the drawing commands for a trajectory.
pub struct BuildPath<'a> {
    trajectory: &'a Trajectory,
}

impl<'a> BuildPath<'a> {
    /// Creates a new `BuildPath` operation.
    #[must_use]
    pub fn new(trajectory: &'a Trajectory) -> Self {
        Self { trajectory }
    }

    /// Executes the operation.
    ///
    /// Fewer than two points yield an empty path. Otherwise the path moves to
    /// the first point and emits one command per segment.
    pub fn execute<R: HandleResolver + ?Sized>(&self, resolver: &R) -> Path {
        let mut commands = Vec::with_capacity(self.trajectory.len());
        for segment in segments(self.trajectory, resolver) {
            if commands.is_empty() {
                commands.push(PathCommand::MoveTo(segment.start()));
            }
            commands.push(match segment {
                Segment::Line { to, .. } => PathCommand::LineTo(to),
                Segment::Cubic(c) => PathCommand::CubicTo {
                    ctrl1: c.ctrl1,
                    ctrl2: c.ctrl2,
                    to: c.end,
                },
            });
        }
        Path { commands }
    }
}
