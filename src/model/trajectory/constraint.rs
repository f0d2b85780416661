//! Neighbour-aware handle constraints.
//!
//! A pinned handle is not a drag target: its direction is always derived from
//! the adjacent anchor so that the drawn tangent at a line segment matches the
//! line. After any geometric edit the affected points are walked breadth-first
//! from the edited point, each visited at most once, so a long linear run costs
//! one pass and a malformed sequence cannot recurse forever.

use std::collections::VecDeque;
use std::f64::consts::PI;

use tracing::trace;

use crate::math::angle_toward;
use crate::model::{ControlPointId, HandleSide, SegmentType, Symmetry};

use super::Trajectory;

impl Trajectory {
    /// Symmetry that `requested` becomes at `index` given the neighbouring
    /// segment types.
    pub(super) fn resolve_symmetry(&self, index: usize, requested: Symmetry) -> Symmetry {
        let len = self.order.len();
        if index == 0 || index + 1 >= len {
            return requested;
        }
        let (Some(prev), Some(this)) = (self.point_at(index - 1), self.point_at(index)) else {
            return requested;
        };
        let before = prev.segment_type();
        let after = this.segment_type();

        if before == SegmentType::Linear && after == SegmentType::Linear {
            return Symmetry::Broken;
        }
        if requested == Symmetry::Mirrored
            && !(before == SegmentType::Bezier && after == SegmentType::Bezier)
        {
            return Symmetry::Aligned;
        }
        requested
    }

    /// Re-aims pinned handles starting at `start` and spreading to whichever
    /// neighbours need it.
    pub(super) fn enforce_linear_constraint(&mut self, start: ControlPointId) {
        let Some(start_index) = self.index_of(start) else {
            return;
        };
        let mut visited = vec![false; self.order.len()];
        let mut queue = VecDeque::from([(start_index, false)]);

        while let Some((index, triggered_by_adjacent)) = queue.pop_front() {
            if std::mem::replace(&mut visited[index], true) {
                continue;
            }
            for next in self.enforce_at(index, triggered_by_adjacent).into_iter().flatten() {
                if !visited[next] {
                    queue.push_back((next, true));
                }
            }
        }
    }

    /// Updates the pinned handles of the point at `index` and returns the
    /// neighbours that must be visited next.
    fn enforce_at(&mut self, index: usize, triggered_by_adjacent: bool) -> [Option<usize>; 2] {
        let before = index.checked_sub(1);
        let after = Some(index + 1).filter(|&i| i < self.order.len());
        let mut schedule = [None, None];

        let Some(point) = self.point_at(index) else {
            return schedule;
        };
        let hip = point.handle_in().is_pinned();
        let hop = point.handle_out().is_pinned();
        let symmetry = point.symmetry();
        trace!(index, hip, hop, triggered_by_adjacent, "enforce linear constraint");

        if hip != hop {
            // Endpoint of a linear run.
            let (priority, secondary, adjacent) = if hip {
                (HandleSide::In, HandleSide::Out, before)
            } else {
                (HandleSide::Out, HandleSide::In, after)
            };
            if let Some(adjacent) = adjacent {
                if let Some(theta) = self.aim_handle(index, priority, adjacent) {
                    if symmetry == Symmetry::Aligned {
                        self.set_handle_angle(index, secondary, theta + PI);
                    }
                }
                if !triggered_by_adjacent {
                    schedule[usize::from(!hip)] = Some(adjacent);
                }
            }
        } else if hip && hop {
            // Interior of a linear run.
            if let Some(b) = before {
                self.aim_handle(index, HandleSide::In, b);
                schedule[0] = Some(b);
            }
            if let Some(a) = after {
                self.aim_handle(index, HandleSide::Out, a);
                schedule[1] = Some(a);
            }
        }

        if !triggered_by_adjacent {
            // Neighbours whose facing handle is pinned point at this anchor.
            if let Some(b) = before {
                if self.point_at(b).is_some_and(|p| p.handle_out().is_pinned()) {
                    schedule[0] = Some(b);
                }
            }
            if let Some(a) = after {
                if self.point_at(a).is_some_and(|p| p.handle_in().is_pinned()) {
                    schedule[1] = Some(a);
                }
            }
        }

        schedule
    }

    /// Points the handle on `side` of `index` at the anchor of `target`.
    /// Returns the new angle, or `None` if the anchors coincide.
    fn aim_handle(&mut self, index: usize, side: HandleSide, target: usize) -> Option<f64> {
        let from = self.point_at(index)?.position();
        let to = self.point_at(target)?.position();
        let theta = angle_toward(&from, &to)?;
        self.set_handle_angle(index, side, theta);
        Some(theta)
    }

    fn set_handle_angle(&mut self, index: usize, side: HandleSide, angle: f64) {
        let Some(id) = self.id_at(index) else {
            return;
        };
        if let Some(point) = self.point_mut(id) {
            point.handle_mut(side).set_angle(angle);
        }
    }
}
