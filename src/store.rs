use slotmap::SlotMap;
use tracing::debug;

use crate::math::Point2;
use crate::model::{Color, ControlPointId, HandleSide, Trajectory};

slotmap::new_key_type! {
    /// Unique identifier for a trajectory in a [`TrajectoryStore`].
    pub struct TrajectoryId;
}

/// Owns every trajectory of a project, in display order.
///
/// Lookups with a stale id return `None` and mutations with one are no-ops,
/// matching the trajectory-level policy.
#[derive(Debug, Default, Clone)]
pub struct TrajectoryStore {
    trajectories: SlotMap<TrajectoryId, Trajectory>,
    order: Vec<TrajectoryId>,
    created: usize,
}

impl TrajectoryStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty trajectory with the next palette colour.
    pub fn create(&mut self, name: &str) -> TrajectoryId {
        let mut trajectory = Trajectory::new(name);
        trajectory.set_color(Color::from_palette(self.created));
        self.created += 1;
        self.add(trajectory)
    }

    /// Inserts a trajectory at the end and returns its id.
    pub fn add(&mut self, trajectory: Trajectory) -> TrajectoryId {
        let id = self.trajectories.insert(trajectory);
        self.order.push(id);
        id
    }

    /// Removes a trajectory and returns it.
    pub fn remove(&mut self, id: TrajectoryId) -> Option<Trajectory> {
        let removed = self.trajectories.remove(id)?;
        self.order.retain(|&other| other != id);
        Some(removed)
    }

    #[must_use]
    pub fn get(&self, id: TrajectoryId) -> Option<&Trajectory> {
        self.trajectories.get(id)
    }

    pub fn get_mut(&mut self, id: TrajectoryId) -> Option<&mut Trajectory> {
        self.trajectories.get_mut(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Trajectory ids in display order.
    #[must_use]
    pub fn ids(&self) -> &[TrajectoryId] {
        &self.order
    }

    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<TrajectoryId> {
        self.order.get(index).copied()
    }

    /// Iterates `(id, trajectory)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (TrajectoryId, &Trajectory)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.trajectories.get(id).map(|t| (id, t)))
    }

    /// Whether `point` belongs to `trajectory`.
    ///
    /// Control point ids are allocated per trajectory, so copies and cut
    /// halves reuse them; a point is only identified by the pair.
    #[must_use]
    pub fn contains_point(&self, trajectory: TrajectoryId, point: ControlPointId) -> bool {
        self.get(trajectory).is_some_and(|t| t.point(point).is_some())
    }

    // --- Ordering ---

    /// Moves the trajectory at `from` to position `to` (clamped).
    pub fn move_trajectory(&mut self, from: usize, to: usize) {
        if from >= self.order.len() {
            debug!(from, "move_trajectory: index out of range");
            return;
        }
        let id = self.order.remove(from);
        let to = to.min(self.order.len());
        self.order.insert(to, id);
    }

    /// Reorders to match `ids`. Unknown ids are skipped; trajectories missing
    /// from `ids` keep their relative order after the listed ones.
    pub fn reorder(&mut self, ids: &[TrajectoryId]) {
        let mut order: Vec<TrajectoryId> = Vec::with_capacity(self.order.len());
        for &id in ids {
            if self.trajectories.contains_key(id) && !order.contains(&id) {
                order.push(id);
            }
        }
        for &id in &self.order {
            if !order.contains(&id) {
                order.push(id);
            }
        }
        self.order = order;
    }

    // --- Handle queries ---

    /// Absolute handle tip position; the resolver the path sampler consumes.
    #[must_use]
    pub fn handle_position(&self, trajectory: TrajectoryId, point: ControlPointId, side: HandleSide) -> Option<Point2> {
        self.get(trajectory)?.handle_position(point, side)
    }

    #[must_use]
    pub fn handle_polar(&self, trajectory: TrajectoryId, point: ControlPointId, side: HandleSide) -> Option<(f64, f64)> {
        self.get(trajectory)?.handle_polar(point, side)
    }

    /// Handle resolver bound to one trajectory.
    pub fn resolver(&self, trajectory: TrajectoryId) -> impl Fn(ControlPointId, HandleSide) -> Option<Point2> + '_ {
        move |point, side| self.handle_position(trajectory, point, side)
    }

    // --- Cut / merge / duplicate ---

    /// Cuts a trajectory at an interior point.
    ///
    /// The original id keeps the first half; the second half is appended as a
    /// new trajectory whose id is returned. Nothing changes if the trajectory
    /// is missing or the point is not interior.
    pub fn cut_trajectory_at(&mut self, trajectory: TrajectoryId, point: ControlPointId) -> Option<TrajectoryId> {
        let (head, tail) = self.get(trajectory)?.cut_at(point)?;
        if let Some(slot) = self.get_mut(trajectory) {
            *slot = head;
        }
        Some(self.add(tail))
    }

    /// Replaces `first` and `second` with their concatenation, appended at
    /// the end under a new id. The merged trajectory keeps `first`'s
    /// metadata. A trajectory cannot be merged with itself.
    pub fn merge_trajectories(&mut self, first: TrajectoryId, second: TrajectoryId) -> Option<TrajectoryId> {
        if first == second {
            debug!(?first, "merge_trajectories: cannot merge a trajectory with itself");
            return None;
        }
        let merged = self.get(first)?.merge_with(self.get(second)?);
        self.remove(first);
        self.remove(second);
        Some(self.add(merged))
    }

    /// Appends a deep copy of a trajectory and returns the copy's id.
    pub fn duplicate(&mut self, trajectory: TrajectoryId) -> Option<TrajectoryId> {
        let copy = self.get(trajectory)?.clone();
        Some(self.add(copy))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use crate::coords::CoordinateSystem;
    use crate::model::ControlPoint;
    use crate::sampling::{BuildPath, SampleCurve, SamplingParams};

    use super::*;

    fn store_with_row(n: i32) -> (TrajectoryStore, TrajectoryId) {
        let mut store = TrajectoryStore::new();
        let id = store.add(Trajectory::from_points(
            "row",
            (0..n).map(|i| ControlPoint::new(f64::from(i) * 10.0, 0.0).unwrap()),
        ));
        (store, id)
    }

    #[test]
    fn create_rotates_palette() {
        let mut store = TrajectoryStore::new();
        let a = store.create("a");
        let b = store.create("b");
        assert_eq!(store.get(a).unwrap().color(), Color::from_palette(0));
        assert_eq!(store.get(b).unwrap().color(), Color::from_palette(1));
        assert_eq!(store.ids(), &[a, b]);
    }

    #[test]
    fn remove_invalidates_id() {
        let (mut store, id) = store_with_row(2);
        assert!(store.remove(id).is_some());
        assert!(store.get(id).is_none());
        assert!(store.remove(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn cut_replaces_original_and_appends_tail() {
        let (mut store, id) = store_with_row(4);
        let split = store.get(id).unwrap().id_at(2).unwrap();
        let tail = store.cut_trajectory_at(id, split).unwrap();

        assert_eq!(store.ids(), &[id, tail]);
        assert_eq!(store.get(id).unwrap().len(), 3);
        assert_eq!(store.get(tail).unwrap().len(), 2);
    }

    #[test]
    fn cut_at_endpoint_changes_nothing() {
        let (mut store, id) = store_with_row(4);
        let first = store.get(id).unwrap().first().unwrap();
        assert!(store.cut_trajectory_at(id, first).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).unwrap().len(), 4);
    }

    #[test]
    fn merge_replaces_both() {
        let (mut store, id) = store_with_row(4);
        let split = store.get(id).unwrap().id_at(2).unwrap();
        let tail = store.cut_trajectory_at(id, split).unwrap();
        let merged = store.merge_trajectories(id, tail).unwrap();

        assert_eq!(store.ids(), &[merged]);
        assert_eq!(store.get(merged).unwrap().len(), 5);
        assert!(store.get(id).is_none());
        assert!(store.merge_trajectories(merged, merged).is_none());
    }

    #[test]
    fn duplicate_is_deep() {
        let (mut store, id) = store_with_row(2);
        let copy = store.duplicate(id).unwrap();
        let first = store.get(copy).unwrap().first().unwrap();
        store.get_mut(copy).unwrap().set_point_position(first, 5.0, 5.0).unwrap();
        assert_relative_eq!(store.get(id).unwrap().point(first).unwrap().x(), 0.0);
    }

    #[test]
    fn move_and_reorder() {
        let mut store = TrajectoryStore::new();
        let a = store.create("a");
        let b = store.create("b");
        let c = store.create("c");
        store.move_trajectory(0, 2);
        assert_eq!(store.ids(), &[b, c, a]);
        store.reorder(&[a, a]);
        assert_eq!(store.ids(), &[a, b, c]);
        store.move_trajectory(9, 0);
        assert_eq!(store.ids(), &[a, b, c]);
    }

    #[test]
    fn points_are_addressed_per_trajectory() {
        let (mut store, a) = store_with_row(2);
        let b = store.add(Trajectory::from_points(
            "other",
            [ControlPoint::new(0.0, 50.0).unwrap(), ControlPoint::new(10.0, 50.0).unwrap()],
        ));
        let pa = store.get(a).unwrap().first().unwrap();
        let pb = store.get(b).unwrap().first().unwrap();
        // Separate arenas hand out equal keys.
        assert_eq!(pa, pb);
        assert!(store.contains_point(a, pa));
        assert!(store.contains_point(b, pb));
        assert_eq!(
            store.handle_position(b, pb, HandleSide::In),
            store.get(b).unwrap().handle_position(pb, HandleSide::In)
        );
        assert_ne!(
            store.handle_position(b, pb, HandleSide::In),
            store.handle_position(a, pa, HandleSide::In)
        );

        store.get_mut(b).unwrap().remove(pb);
        assert!(!store.contains_point(b, pb));
        assert!(store.contains_point(a, pa));
        assert!(!store.contains_point(TrajectoryId::default(), pa));
    }

    #[test]
    fn duplicate_keeps_point_ids_under_its_own_trajectory() {
        let (mut store, id) = store_with_row(3);
        let copy = store.duplicate(id).unwrap();
        let last = store.get(id).unwrap().last().unwrap();
        assert!(store.contains_point(copy, last));

        store.get_mut(copy).unwrap().set_point_position(last, 0.0, 40.0).unwrap();
        assert_relative_eq!(store.get(copy).unwrap().point(last).unwrap().y(), 40.0);
        assert_relative_eq!(store.get(id).unwrap().point(last).unwrap().y(), 0.0);

        store.get_mut(id).unwrap().remove(last);
        assert!(!store.contains_point(id, last));
        assert!(store.contains_point(copy, last));
    }

    #[test]
    fn store_resolver_drives_sampler() {
        let (store, id) = store_with_row(3);
        let trajectory = store.get(id).unwrap();
        let resolver = store.resolver(id);

        let via_store = BuildPath::new(trajectory).execute(&resolver);
        let direct = BuildPath::new(trajectory).execute(trajectory);
        assert_eq!(via_store, direct);

        let samples = SampleCurve::new(SamplingParams::default()).execute(
            trajectory,
            &resolver,
            &CoordinateSystem::default(),
        );
        assert!(!samples.is_empty());
    }

    #[test]
    fn handle_queries_through_store() {
        let (store, id) = store_with_row(2);
        let point = store.get(id).unwrap().first().unwrap();
        assert_eq!(
            store.handle_polar(id, point, HandleSide::Out),
            store.get(id).unwrap().handle_polar(point, HandleSide::Out)
        );
        let gone = TrajectoryId::default();
        assert!(store.handle_position(gone, point, HandleSide::In).is_none());
    }
}
