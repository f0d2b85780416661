use crate::error::GeometryError;

use super::{Point2, TOLERANCE};

/// A planar cubic Bezier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier2 {
    pub start: Point2,
    pub ctrl1: Point2,
    pub ctrl2: Point2,
    pub end: Point2,
}

impl CubicBezier2 {
    /// Creates a new cubic segment.
    #[must_use]
    pub fn new(start: Point2, ctrl1: Point2, ctrl2: Point2, end: Point2) -> Self {
        Self {
            start,
            ctrl1,
            ctrl2,
            end,
        }
    }

    /// Evaluates the curve at `t ∈ [0, 1]` (Bernstein form).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        Point2::new(
            b0 * self.start.x + b1 * self.ctrl1.x + b2 * self.ctrl2.x + b3 * self.end.x,
            b0 * self.start.y + b1 * self.ctrl1.y + b2 * self.ctrl2.y + b3 * self.end.y,
        )
    }

    /// Builds the cumulative chord-length table over `steps` uniform
    /// subdivisions of the parameter range.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the polyline length is zero.
    pub fn arc_length_table(&self, steps: usize) -> Result<ArcLengthTable, GeometryError> {
        let steps = steps.max(1);
        let mut cumulative = Vec::with_capacity(steps + 1);
        cumulative.push(0.0);
        let mut prev = self.start;
        let mut total = 0.0;
        for i in 1..=steps {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / steps as f64;
            let p = self.point_at(t);
            total += (p - prev).norm();
            cumulative.push(total);
            prev = p;
        }
        ArcLengthTable::from_cumulative(cumulative)
    }
}

/// Cumulative arc length sampled at uniform parameter steps.
///
/// Entry `i` is the polyline length from `t = 0` to `t = i / steps`.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    cumulative: Vec<f64>,
}

impl ArcLengthTable {
    fn from_cumulative(cumulative: Vec<f64>) -> Result<Self, GeometryError> {
        match cumulative.last() {
            Some(&total) if cumulative.len() >= 2 && total > TOLERANCE => Ok(Self { cumulative }),
            _ => Err(GeometryError::Degenerate(
                "curve has zero arc length".to_owned(),
            )),
        }
    }

    /// Total (approximate) length of the curve.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Maps an arc-length distance from the start to a curve parameter.
    ///
    /// Distances outside `[0, total]` are clamped. Within a subdivision the
    /// parameter is interpolated linearly.
    #[must_use]
    pub fn parameter_at_length(&self, distance: f64) -> f64 {
        let total = self.total_length();
        let d = distance.clamp(0.0, total);
        let steps = self.cumulative.len() - 1;
        // First entry strictly greater than d bounds the subdivision.
        let upper = self
            .cumulative
            .partition_point(|&c| c <= d)
            .clamp(1, steps);
        let lo = self.cumulative[upper - 1];
        let hi = self.cumulative[upper];
        let span = hi - lo;
        let frac = if span > TOLERANCE { (d - lo) / span } else { 0.0 };
        #[allow(clippy::cast_precision_loss)]
        let t = ((upper - 1) as f64 + frac) / steps as f64;
        t.clamp(0.0, 1.0)
    }
}
