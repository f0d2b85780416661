use super::{Point2, TOLERANCE};

/// Result of projecting a point onto a line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Segment parameter of the closest point, clamped to `[0, 1]`.
    pub t: f64,
    /// The closest point on the segment.
    pub point: Point2,
    /// Squared distance from the query point to `point`.
    pub distance_squared: f64,
}

impl SegmentProjection {
    /// Distance from the query point to the segment.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance_squared.sqrt()
    }
}

/// Projects `p` onto the segment from `a` to `b`.
///
/// A zero-length segment projects everything onto `a` with `t = 0`.
#[must_use]
pub fn project_point_to_segment(p: &Point2, a: &Point2, b: &Point2) -> SegmentProjection {
    let v = b - a;
    let w = p - a;
    let len_sq = v.norm_squared();

    let t = if len_sq < TOLERANCE * TOLERANCE {
        0.0
    } else {
        (w.dot(&v) / len_sq).clamp(0.0, 1.0)
    };

    let point = a + v * t;
    SegmentProjection {
        t,
        point,
        distance_squared: (p - point).norm_squared(),
    }
}
