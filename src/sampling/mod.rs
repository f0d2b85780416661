//! Path building and curve sampling over a trajectory.
//!
//! Nothing here mutates a trajectory. Handle tips are looked up through a
//! [`HandleResolver`], so callers that keep handles elsewhere (or want to
//! preview an in-flight drag) can substitute their own positions.

mod curve;
mod nearest;
mod path;

pub use curve::{CurvePoint, SampleCurve};
pub use nearest::{NearestSegment, SegmentHit};
pub use path::{BuildPath, Path, PathCommand};

use serde::{Deserialize, Serialize};

use crate::math::bezier_2d::CubicBezier2;
use crate::math::Point2;
use crate::model::{ControlPoint, ControlPointId, HandleSide, SegmentType, Trajectory};

/// Looks up the absolute position of a handle tip.
pub trait HandleResolver {
    /// Returns `None` when the handle cannot be resolved; callers then fall
    /// back to the anchor position.
    fn resolve(&self, point: ControlPointId, side: HandleSide) -> Option<Point2>;
}

impl<F> HandleResolver for F
where
    F: Fn(ControlPointId, HandleSide) -> Option<Point2>,
{
    fn resolve(&self, point: ControlPointId, side: HandleSide) -> Option<Point2> {
        self(point, side)
    }
}

impl HandleResolver for Trajectory {
    fn resolve(&self, point: ControlPointId, side: HandleSide) -> Option<Point2> {
        self.handle_position(point, side)
    }
}

/// Parameters controlling curve sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SamplingParams {
    /// Arc-length distance between consecutive samples.
    pub spacing: f64,
    /// Subdivisions used to approximate a Bezier segment's length.
    pub bezier_steps: usize,
    /// Upper bound on samples emitted for one segment.
    pub max_samples_per_segment: usize,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            spacing: 1.0,
            bezier_steps: 12,
            max_samples_per_segment: 10_000,
        }
    }
}

/// Geometry of one segment, resolved to absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Segment {
    Line { from: Point2, to: Point2 },
    Cubic(CubicBezier2),
}

impl Segment {
    /// Resolves the segment from `a` to `b`. Only Bezier segments use the
    /// handles; every other type is drawn straight.
    pub(crate) fn resolve<R: HandleResolver + ?Sized>(
        (a_id, a): (ControlPointId, &ControlPoint),
        (b_id, b): (ControlPointId, &ControlPoint),
        resolver: &R,
    ) -> Self {
        match a.segment_type() {
            SegmentType::Bezier => {
                let ctrl1 = resolver.resolve(a_id, HandleSide::Out).unwrap_or_else(|| a.position());
                let ctrl2 = resolver.resolve(b_id, HandleSide::In).unwrap_or_else(|| b.position());
                Self::Cubic(CubicBezier2::new(a.position(), ctrl1, ctrl2, b.position()))
            }
            SegmentType::Linear | SegmentType::Clothoid => Self::Line {
                from: a.position(),
                to: b.position(),
            },
        }
    }

    pub(crate) fn start(&self) -> Point2 {
        match self {
            Self::Line { from, .. } => *from,
            Self::Cubic(c) => c.start,
        }
    }

    pub(crate) fn end(&self) -> Point2 {
        match self {
            Self::Line { to, .. } => *to,
            Self::Cubic(c) => c.end,
        }
    }

    pub(crate) fn point_at(&self, t: f64) -> Point2 {
        match self {
            Self::Line { from, to } => from + (to - from) * t,
            Self::Cubic(c) => c.point_at(t),
        }
    }
}

/// Resolved segments of `trajectory`, in order. Empty below two points.
pub(crate) fn segments<'a, R: HandleResolver + ?Sized>(
    trajectory: &'a Trajectory,
    resolver: &'a R,
) -> impl Iterator<Item = Segment> + 'a {
    let points: Vec<_> = trajectory.points().collect();
    (1..points.len()).map(move |i| Segment::resolve(points[i - 1], points[i], resolver))
}
