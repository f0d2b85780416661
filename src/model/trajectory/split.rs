use tracing::debug;

use crate::model::ControlPointId;

use super::Trajectory;

impl Trajectory {
    /// Splits the trajectory at an interior point.
    ///
    /// The first half keeps the points up to and including `id` (with their
    /// ids); the second half starts with a copy of `id` and continues to the
    /// end under fresh ids. Both halves carry this trajectory's metadata.
    ///
    /// Returns `None` if `id` is missing, first, or last.
    #[must_use]
    pub fn cut_at(&self, id: ControlPointId) -> Option<(Self, Self)> {
        let Some(index) = self.index_of(id) else {
            debug!(?id, "cut_at: point not found");
            return None;
        };
        if index == 0 || index + 1 >= self.order.len() {
            debug!(index, "cut_at: point is not interior");
            return None;
        }

        let mut head = self.clone();
        for dropped in head.order.split_off(index + 1) {
            head.points.remove(dropped);
        }

        let mut tail = self.empty_like();
        for &pid in &self.order[index..] {
            if let Some(point) = self.points.get(pid) {
                tail.append(point.clone());
            }
        }

        Some((head, tail))
    }

    /// Concatenates `other`'s points after this trajectory's points.
    ///
    /// The result keeps this trajectory's metadata and point ids; `other`'s
    /// points are deep-copied under fresh ids.
    #[must_use]
    pub fn merge_with(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for (_, point) in other.points() {
            merged.append(point.clone());
        }
        merged
    }
}
