use tracing::{debug, trace};

use crate::coords::CoordinateSystem;
use crate::math::angle::{lerp_angle, normalize_angle};
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::model::{ControlPoint, Trajectory};

use super::{segments, HandleResolver, SamplingParams, Segment};

/// Samples closer than this to a segment's end are dropped.
const END_EPSILON: f64 = 1e-9;

/// A sample on the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub position: Point2,
    /// User heading in radians, normalized to `(-π, π]`.
    pub heading: f64,
    /// Index of the segment (and of its start point).
    pub segment_index: usize,
    /// Curve parameter within the segment.
    pub t: f64,
    /// Arc-length fraction within the segment, in `(0, 1)`.
    pub s: f64,
}

/// Places samples along a trajectory at a fixed arc-length spacing.
///
/// Each segment is walked independently: samples sit at `spacing`,
/// `2 * spacing`, ... from the segment start and stop short of its end, so
/// control points themselves are never sampled.
pub struct SampleCurve {
    params: SamplingParams,
}

impl SampleCurve {
    /// Creates a new `SampleCurve` operation.
    #[must_use]
    pub fn new(params: SamplingParams) -> Self {
        Self { params }
    }

    /// Executes the sampling.
    ///
    /// Non-positive spacing, and segments of zero length, produce no samples.
    pub fn execute<R: HandleResolver + ?Sized>(
        &self,
        trajectory: &Trajectory,
        resolver: &R,
        coords: &CoordinateSystem,
    ) -> Vec<CurvePoint> {
        let spacing = self.params.spacing;
        if !spacing.is_finite() || spacing <= 0.0 {
            debug!(spacing, "sampling skipped: spacing must be positive");
            return Vec::new();
        }

        let anchors: Vec<&ControlPoint> = trajectory.points().map(|(_, p)| p).collect();
        let mut samples = Vec::new();

        for (index, segment) in segments(trajectory, resolver).enumerate() {
            let placed = self.place(&segment, spacing);
            if placed.is_empty() {
                trace!(segment = index, "no interior samples");
                continue;
            }

            let (from, to) = (anchors[index], anchors[index + 1]);
            let positions: Vec<Point2> = placed.iter().map(|&(t, _)| segment.point_at(t)).collect();

            for (k, &(t, s)) in placed.iter().enumerate() {
                let heading = match (from.heading(), to.heading()) {
                    (Some(a), Some(b)) => lerp_angle(a, b, s),
                    (Some(h), None) | (None, Some(h)) => h,
                    (None, None) => {
                        let before = if k == 0 { segment.start() } else { positions[k - 1] };
                        let after = positions.get(k + 1).copied().unwrap_or_else(|| segment.end());
                        estimate_heading(&segment, &before, &positions[k], &after, coords)
                    }
                };
                samples.push(CurvePoint {
                    position: positions[k],
                    heading,
                    segment_index: index,
                    t,
                    s,
                });
            }
        }

        samples
    }

    /// Returns `(t, s)` for each interior sample of `segment`.
    fn place(&self, segment: &Segment, spacing: f64) -> Vec<(f64, f64)> {
        let (length, table) = match segment {
            Segment::Line { from, to } => ((to - from).norm(), None),
            Segment::Cubic(curve) => match curve.arc_length_table(self.params.bezier_steps) {
                Ok(table) => (table.total_length(), Some(table)),
                Err(err) => {
                    trace!(%err, "skipping degenerate segment");
                    return Vec::new();
                }
            },
        };
        if length <= TOLERANCE {
            return Vec::new();
        }

        let mut placed = Vec::new();
        for k in 1..=self.params.max_samples_per_segment {
            #[allow(clippy::cast_precision_loss)]
            let d = k as f64 * spacing;
            if d >= length - END_EPSILON {
                return placed;
            }
            let t = table
                .as_ref()
                .map_or(d / length, |table| table.parameter_at_length(d));
            placed.push((t, d / length));
        }
        debug!(
            length,
            spacing,
            cap = self.params.max_samples_per_segment,
            "segment sampling truncated"
        );
        placed
    }
}

/// Heading along the local tangent, from the averaged unit chords into and
/// out of `here`.
///
/// Directions are measured in the user frame, which is the group-local frame
/// the canonical-degree conversion expects, so the estimate does not depend
/// on the configured rotation sense.
fn estimate_heading(
    segment: &Segment,
    before: &Point2,
    here: &Point2,
    after: &Point2,
    coords: &CoordinateSystem,
) -> f64 {
    let mut direction = unit(here - before) + unit(after - here);
    if direction.norm() <= TOLERANCE {
        direction = segment.end() - segment.start();
    }
    if direction.norm() <= TOLERANCE {
        return 0.0;
    }
    let degrees = direction.y.atan2(direction.x).to_degrees();
    normalize_angle(coords.heading_from_canonical_degrees(degrees))
}

fn unit(v: Vector2) -> Vector2 {
    let n = v.norm();
    if n <= TOLERANCE {
        Vector2::zeros()
    } else {
        v / n
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use approx::assert_relative_eq;

    use crate::coords::{CoordinateConfig, Direction, RotationDirection};
    use crate::model::{ControlPointId, HandleSide, SegmentType};

    use super::*;

    fn line(from: (f64, f64), to: (f64, f64)) -> Trajectory {
        let mut t = Trajectory::from_points(
            "line",
            [
                ControlPoint::new(from.0, from.1).unwrap(),
                ControlPoint::new(to.0, to.1).unwrap(),
            ],
        );
        let first = t.first().unwrap();
        t.set_segment_type(first, SegmentType::Linear);
        t
    }

    fn sample(t: &Trajectory, spacing: f64) -> Vec<CurvePoint> {
        SampleCurve::new(SamplingParams {
            spacing,
            ..SamplingParams::default()
        })
        .execute(t, t, &CoordinateSystem::default())
    }

    // ── Placement ──

    #[test]
    fn ten_unit_line_gives_nine_samples() {
        let t = line((0.0, 0.0), (10.0, 0.0));
        let samples = sample(&t, 1.0);
        assert_eq!(samples.len(), 9);
        for (s, k) in samples.iter().zip(1..) {
            let expected = f64::from(k);
            assert_relative_eq!(s.position.x, expected, epsilon = 1e-9);
            assert_relative_eq!(s.position.y, 0.0);
            assert_relative_eq!(s.s, expected / 10.0, epsilon = 1e-12);
            assert_eq!(s.segment_index, 0);
        }
    }

    #[test]
    fn non_positive_spacing_yields_nothing() {
        let t = line((0.0, 0.0), (10.0, 0.0));
        assert!(sample(&t, 0.0).is_empty());
        assert!(sample(&t, -1.0).is_empty());
        assert!(sample(&t, f64::NAN).is_empty());
    }

    #[test]
    fn zero_length_segment_is_skipped() {
        let mut t = line((0.0, 0.0), (0.0, 0.0));
        t.append(ControlPoint::new(4.0, 0.0).unwrap());
        let second = t.id_at(1).unwrap();
        t.set_segment_type(second, SegmentType::Linear);
        let samples = sample(&t, 1.0);
        assert_eq!(samples.len(), 3);
        assert!(samples.iter().all(|s| s.segment_index == 1));
    }

    #[test]
    fn degenerate_bezier_is_skipped() {
        let t = Trajectory::from_points(
            "dot",
            [ControlPoint::new(1.0, 1.0).unwrap(), ControlPoint::new(1.0, 1.0).unwrap()],
        );
        let anchor_only =
            |id: ControlPointId, _: HandleSide| -> Option<Point2> { t.point(id).map(ControlPoint::position) };
        let samples = SampleCurve::new(SamplingParams::default()).execute(
            &t,
            &anchor_only,
            &CoordinateSystem::default(),
        );
        assert!(samples.is_empty());
    }

    #[test]
    fn sample_cap_bounds_output() {
        let t = line((0.0, 0.0), (10.0, 0.0));
        let samples = SampleCurve::new(SamplingParams {
            spacing: 1e-6,
            max_samples_per_segment: 50,
            ..SamplingParams::default()
        })
        .execute(&t, &t, &CoordinateSystem::default());
        assert_eq!(samples.len(), 50);
    }

    #[test]
    fn straight_bezier_matches_line_placement() {
        let mut t = Trajectory::from_points(
            "bez",
            [ControlPoint::new(0.0, 0.0).unwrap(), ControlPoint::new(9.0, 0.0).unwrap()],
        );
        let (a, b) = (t.first().unwrap(), t.last().unwrap());
        t.set_handle_polar(a, HandleSide::Out, 3.0, 0.0).unwrap();
        t.set_handle_polar(b, HandleSide::In, 3.0, std::f64::consts::PI).unwrap();

        let samples = sample(&t, 1.5);
        assert_eq!(samples.len(), 5);
        for (s, k) in samples.iter().zip(1..) {
            let expected = 1.5 * f64::from(k);
            assert_relative_eq!(s.position.x, expected, epsilon = 1e-6);
            assert_relative_eq!(s.t, expected / 9.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn curved_bezier_is_longer_than_chord() {
        let t = Trajectory::from_points(
            "arc",
            [ControlPoint::new(0.0, 0.0).unwrap(), ControlPoint::new(10.0, 0.0).unwrap()],
        );
        // Default handles bow the curve sideways.
        let samples = sample(&t, 1.0);
        assert!(samples.len() > 9);
        assert!(samples.windows(2).all(|w| w[0].t < w[1].t));
    }

    // ── Headings ──

    #[test]
    fn both_headings_interpolate_by_arc_length() {
        let mut t = line((0.0, 0.0), (10.0, 0.0));
        let (a, b) = (t.first().unwrap(), t.last().unwrap());
        t.set_point_heading(a, Some(0.0)).unwrap();
        t.set_point_heading(b, Some(FRAC_PI_2)).unwrap();
        let samples = sample(&t, 5.0);
        assert_eq!(samples.len(), 1);
        assert_relative_eq!(samples[0].heading, FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn interpolation_takes_shortest_turn() {
        let mut t = line((0.0, 0.0), (10.0, 0.0));
        let (a, b) = (t.first().unwrap(), t.last().unwrap());
        t.set_point_heading(a, Some(3.0)).unwrap();
        t.set_point_heading(b, Some(-3.0)).unwrap();
        let samples = sample(&t, 5.0);
        // Halfway across the ±π seam, not through zero.
        assert!(samples[0].heading.abs() > 3.0);
    }

    #[test]
    fn single_heading_is_used_uniformly() {
        let mut t = line((0.0, 0.0), (10.0, 0.0));
        let b = t.last().unwrap();
        t.set_point_heading(b, Some(1.0)).unwrap();
        assert!(sample(&t, 2.0).iter().all(|s| (s.heading - 1.0).abs() < 1e-12));
    }

    #[test]
    fn missing_headings_follow_tangent() {
        let t = line((0.0, 0.0), (0.0, 10.0));
        for s in sample(&t, 1.0) {
            assert_relative_eq!(s.heading, FRAC_PI_2, epsilon = 1e-12);
        }
    }

    #[test]
    fn tangent_estimate_ignores_rotation_sense() {
        let t = line((0.0, 0.0), (0.0, 10.0));
        let math = CoordinateSystem::new(&CoordinateConfig {
            positive_x: Direction::Right,
            positive_y: Direction::Up,
            zero_angle: Direction::Right,
            rotation: RotationDirection::Ccw,
        });
        let samples = SampleCurve::new(SamplingParams::default()).execute(&t, &t, &math);
        for s in samples {
            assert_relative_eq!(s.heading, FRAC_PI_2, epsilon = 1e-12);
        }
    }

    #[test]
    fn tangent_estimate_respects_zero_direction() {
        let t = line((0.0, 0.0), (10.0, 0.0));
        let north_up = CoordinateSystem::new(&CoordinateConfig {
            zero_angle: Direction::Up,
            ..CoordinateConfig::default()
        });
        let samples = SampleCurve::new(SamplingParams::default()).execute(&t, &t, &north_up);
        // Screen right is a quarter turn clockwise from screen up.
        assert_relative_eq!(samples[0].heading, FRAC_PI_2, epsilon = 1e-12);
    }
}
