use crate::math::distance_2d::project_point_to_segment;
use crate::math::Point2;
use crate::model::Trajectory;

/// Closest segment to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    pub segment_index: usize,
    /// Parameter along the chord, in `[0, 1]`.
    pub t: f64,
    /// Projection of the query onto the chord.
    pub point: Point2,
    pub distance_squared: f64,
}

/// Finds the segment whose chord passes closest to a point, for inserting a
/// new control point where the user clicked.
///
/// Segments are approximated by the straight chord between their anchors.
pub struct NearestSegment {
    query: Point2,
}

impl NearestSegment {
    /// Creates a new `NearestSegment` query.
    #[must_use]
    pub fn new(query: Point2) -> Self {
        Self { query }
    }

    /// Executes the query. Returns `None` for fewer than two points; ties go
    /// to the earlier segment.
    #[must_use]
    pub fn execute(&self, trajectory: &Trajectory) -> Option<SegmentHit> {
        let anchors: Vec<Point2> = trajectory.points().map(|(_, p)| p.position()).collect();
        let mut best: Option<SegmentHit> = None;
        for (segment_index, pair) in anchors.windows(2).enumerate() {
            let projection = project_point_to_segment(&self.query, &pair[0], &pair[1]);
            if best.is_none_or(|b| projection.distance_squared < b.distance_squared) {
                best = Some(SegmentHit {
                    segment_index,
                    t: projection.t,
                    point: projection.point,
                    distance_squared: projection.distance_squared,
                });
            }
        }
        best
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use crate::model::ControlPoint;

    use super::*;

    fn zigzag() -> Trajectory {
        Trajectory::from_points(
            "zigzag",
            [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (20.0, 10.0)]
                .into_iter()
                .map(|(x, y)| ControlPoint::new(x, y).unwrap()),
        )
    }

    #[test]
    fn picks_closest_chord() {
        let hit = NearestSegment::new(Point2::new(11.0, 4.0)).execute(&zigzag()).unwrap();
        assert_eq!(hit.segment_index, 1);
        assert_relative_eq!(hit.point.x, 10.0);
        assert_relative_eq!(hit.point.y, 4.0);
        assert_relative_eq!(hit.t, 0.4);
        assert_relative_eq!(hit.distance_squared, 1.0);
    }

    #[test]
    fn tie_goes_to_earlier_segment() {
        // Equidistant from the end of segment 0 and the start of segment 1.
        let hit = NearestSegment::new(Point2::new(12.0, -2.0)).execute(&zigzag()).unwrap();
        assert_eq!(hit.segment_index, 0);
    }

    #[test]
    fn needs_two_points() {
        let single = Trajectory::from_points("one", [ControlPoint::new(0.0, 0.0).unwrap()]);
        assert!(NearestSegment::new(Point2::origin()).execute(&single).is_none());
    }

    #[test]
    fn hit_inserts_after_segment_start() {
        let mut t = zigzag();
        let hit = NearestSegment::new(Point2::new(5.0, 1.0)).execute(&t).unwrap();
        let id = t.insert_on_segment(hit.segment_index, hit.point).unwrap();
        assert_eq!(t.index_of(id), Some(1));
        assert_relative_eq!(t.point(id).unwrap().x(), 5.0);
        assert!(t.point(id).unwrap().heading().is_none());
    }
}
