mod color;
mod constraint;
mod split;

pub use color::Color;

use std::f64::consts::PI;

use slotmap::SlotMap;
use tracing::debug;

use crate::error::{ensure_finite, Result};
use crate::math::Point2;
use crate::sampling::CurvePoint;

use super::control_point::ControlPoint;
use super::handle::Handle;
use super::{sanitize_name, ControlPointId, HandleId, HandleSide, InterpolationMode, SegmentType, Symmetry};

const DEFAULT_NAME: &str = "Trajectory";

/// An ordered sequence of control points joined by line or Bezier segments.
///
/// The trajectory is the aggregate root for its points: it owns them in an
/// arena keyed by [`ControlPointId`] and exposes them read-only. Every
/// geometric mutation goes through a method here so that pinned handles and
/// symmetry tags are brought back into agreement with the neighbours before
/// the call returns.
///
/// Lookups by an id that is not (or no longer) part of the trajectory are
/// silent no-ops: edits racing a deletion simply have no effect.
#[derive(Debug, Clone)]
pub struct Trajectory {
    name: String,
    color: Color,
    interpolation: InterpolationMode,
    visible: bool,
    locked: bool,
    points: SlotMap<ControlPointId, ControlPoint>,
    order: Vec<ControlPointId>,
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl Trajectory {
    /// Creates an empty, visible, unlocked trajectory.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: sanitize_name(name, DEFAULT_NAME),
            color: Color::default(),
            interpolation: InterpolationMode::default(),
            visible: true,
            locked: false,
            points: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Creates a trajectory from points in order and settles all constraints.
    #[must_use]
    pub fn from_points(name: &str, points: impl IntoIterator<Item = ControlPoint>) -> Self {
        let mut trajectory = Self::new(name);
        for point in points {
            trajectory.append(point);
        }
        trajectory.refresh_constraints();
        trajectory
    }

    /// An empty trajectory carrying this one's metadata.
    pub(crate) fn empty_like(&self) -> Self {
        Self {
            name: self.name.clone(),
            color: self.color,
            interpolation: self.interpolation,
            visible: self.visible,
            locked: self.locked,
            points: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    // --- Metadata ---

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = sanitize_name(name, DEFAULT_NAME);
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[must_use]
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    pub fn set_interpolation(&mut self, mode: InterpolationMode) {
        self.interpolation = mode;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    // --- Queries ---

    /// Number of control points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of segments (`len - 1`, or zero for fewer than two points).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.order.len().saturating_sub(1)
    }

    /// Point ids in trajectory order.
    #[must_use]
    pub fn ids(&self) -> &[ControlPointId] {
        &self.order
    }

    /// Iterates `(id, point)` in trajectory order.
    pub fn points(&self) -> impl Iterator<Item = (ControlPointId, &ControlPoint)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.points.get(id).map(|p| (id, p)))
    }

    #[must_use]
    pub fn point(&self, id: ControlPointId) -> Option<&ControlPoint> {
        self.points.get(id)
    }

    #[must_use]
    pub fn point_at(&self, index: usize) -> Option<&ControlPoint> {
        self.order.get(index).and_then(|&id| self.points.get(id))
    }

    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<ControlPointId> {
        self.order.get(index).copied()
    }

    /// Position of `id` in the sequence.
    #[must_use]
    pub fn index_of(&self, id: ControlPointId) -> Option<usize> {
        if !self.points.contains_key(id) {
            return None;
        }
        self.order.iter().position(|&other| other == id)
    }

    #[must_use]
    pub fn first(&self) -> Option<ControlPointId> {
        self.order.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<ControlPointId> {
        self.order.last().copied()
    }

    /// The point immediately before `id`.
    #[must_use]
    pub fn before(&self, id: ControlPointId) -> Option<ControlPointId> {
        let index = self.index_of(id)?;
        index.checked_sub(1).and_then(|i| self.id_at(i))
    }

    /// The point immediately after `id`.
    #[must_use]
    pub fn after(&self, id: ControlPointId) -> Option<ControlPointId> {
        let index = self.index_of(id)?;
        self.id_at(index + 1)
    }

    /// Looks up a handle by id.
    #[must_use]
    pub fn handle(&self, id: HandleId) -> Option<&Handle> {
        self.points.get(id.point).map(|p| p.handle(id.side))
    }

    /// Absolute position of a handle tip (anchor plus polar offset).
    #[must_use]
    pub fn handle_position(&self, id: ControlPointId, side: HandleSide) -> Option<Point2> {
        self.points.get(id).map(|p| p.handle_position(side))
    }

    /// Polar offset `(radius, angle)` of a handle.
    #[must_use]
    pub fn handle_polar(&self, id: ControlPointId, side: HandleSide) -> Option<(f64, f64)> {
        self.points.get(id).map(|p| p.handle(side).polar())
    }

    /// Deep copy of a point, ready to be inserted under a fresh id.
    #[must_use]
    pub fn copy_point(&self, id: ControlPointId) -> Option<ControlPoint> {
        self.points.get(id).cloned()
    }

    // --- Structural edits (no constraint propagation) ---

    /// Appends a point and returns its id.
    pub fn append(&mut self, point: ControlPoint) -> ControlPointId {
        let id = self.points.insert(point);
        self.order.push(id);
        id
    }

    /// Inserts a point at `index`, clamped to `0..=len`.
    pub fn insert_at(&mut self, index: usize, point: ControlPoint) -> ControlPointId {
        let index = index.min(self.order.len());
        let id = self.points.insert(point);
        self.order.insert(index, id);
        id
    }

    /// Inserts a point before `anchor`. Returns `None` (and inserts nothing)
    /// if `anchor` is not in the trajectory.
    pub fn insert_before(&mut self, point: ControlPoint, anchor: ControlPointId) -> Option<ControlPointId> {
        let Some(index) = self.index_of(anchor) else {
            debug!(?anchor, "insert_before: anchor not found");
            return None;
        };
        Some(self.insert_at(index, point))
    }

    /// Inserts a point after `anchor`. Returns `None` (and inserts nothing)
    /// if `anchor` is not in the trajectory.
    pub fn insert_after(&mut self, point: ControlPoint, anchor: ControlPointId) -> Option<ControlPointId> {
        let Some(index) = self.index_of(anchor) else {
            debug!(?anchor, "insert_after: anchor not found");
            return None;
        };
        Some(self.insert_at(index + 1, point))
    }

    /// Inserts a new point at `position` inside segment `segment_index`,
    /// i.e. right after that segment's start point.
    ///
    /// Returns `None` if there is no such segment or the position is not
    /// finite.
    pub fn insert_on_segment(&mut self, segment_index: usize, position: Point2) -> Option<ControlPointId> {
        if segment_index + 1 >= self.order.len() {
            debug!(segment = segment_index, "insert_on_segment: no such segment");
            return None;
        }
        let point = ControlPoint::new(position.x, position.y).ok()?;
        Some(self.insert_at(segment_index + 1, point))
    }

    /// Inserts a new point at a curve sample, carrying the sample's heading.
    pub fn insert_on_curve(&mut self, sample: &CurvePoint) -> Option<ControlPointId> {
        let mut point = ControlPoint::new(sample.position.x, sample.position.y).ok()?;
        point.set_heading(Some(sample.heading)).ok()?;
        if sample.segment_index + 1 >= self.order.len() {
            debug!(segment = sample.segment_index, "insert_on_curve: no such segment");
            return None;
        }
        Some(self.insert_at(sample.segment_index + 1, point))
    }

    /// Removes a point and returns it.
    pub fn remove(&mut self, id: ControlPointId) -> Option<ControlPoint> {
        let Some(index) = self.index_of(id) else {
            debug!(?id, "remove: point not found");
            return None;
        };
        self.order.remove(index);
        self.points.remove(id)
    }

    /// Removes every point.
    pub fn remove_all(&mut self) {
        self.order.clear();
        self.points.clear();
    }

    // --- Per-point flags (no geometric effect) ---

    pub fn set_point_name(&mut self, id: ControlPointId, name: &str) {
        if let Some(point) = self.point_mut(id) {
            point.set_name(name);
        }
    }

    pub fn set_point_locked(&mut self, id: ControlPointId, locked: bool) {
        if let Some(point) = self.point_mut(id) {
            point.set_locked(locked);
        }
    }

    pub fn set_point_event(&mut self, id: ControlPointId, is_event: bool) {
        if let Some(point) = self.point_mut(id) {
            point.set_is_event(is_event);
        }
    }

    /// Sets or clears a point's authored heading.
    ///
    /// # Errors
    ///
    /// Returns an error if the heading is not finite.
    pub fn set_point_heading(&mut self, id: ControlPointId, heading: Option<f64>) -> Result<()> {
        if let Some(h) = heading {
            ensure_finite("heading", h)?;
        }
        match self.point_mut(id) {
            Some(point) => point.set_heading(heading),
            None => Ok(()),
        }
    }

    // --- Geometric edits (propagate constraints) ---

    /// Moves a point, then re-aims every pinned handle affected by the move.
    ///
    /// # Errors
    ///
    /// Returns an error if either coordinate is not finite; nothing changes.
    pub fn set_point_position(&mut self, id: ControlPointId, x: f64, y: f64) -> Result<()> {
        let x = ensure_finite("x", x)?;
        let y = ensure_finite("y", y)?;
        let Some(point) = self.point_mut(id) else {
            return Ok(());
        };
        point.set_position(x, y)?;
        self.enforce_linear_constraint(id);
        Ok(())
    }

    /// Moves a point by `(dx, dy)`; see [`Trajectory::set_point_position`].
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is not finite.
    pub fn offset_point_position(&mut self, id: ControlPointId, dx: f64, dy: f64) -> Result<()> {
        let dx = ensure_finite("dx", dx)?;
        let dy = ensure_finite("dy", dy)?;
        let Some(point) = self.points.get(id) else {
            return Ok(());
        };
        let target = point.position() + crate::math::Vector2::new(dx, dy);
        self.set_point_position(id, target.x, target.y)
    }

    /// Places a handle tip at the absolute position `(x, y)`.
    ///
    /// The radius always follows the drag. The angle is only taken when the
    /// opposite handle is free; otherwise the handle's direction is derived
    /// from the neighbouring anchor.
    ///
    /// # Errors
    ///
    /// Returns an error if either coordinate is not finite.
    pub fn set_handle_position(&mut self, id: ControlPointId, side: HandleSide, x: f64, y: f64) -> Result<()> {
        let x = ensure_finite("x", x)?;
        let y = ensure_finite("y", y)?;
        let Some(point) = self.points.get(id) else {
            debug!(?id, "set_handle_position: point not found");
            return Ok(());
        };
        let d = Point2::new(x, y) - point.position();
        self.apply_handle_edit(id, side, d.norm(), d.y.atan2(d.x));
        Ok(())
    }

    /// Places a handle tip at `(dx, dy)` relative to its anchor.
    ///
    /// # Errors
    ///
    /// Returns an error if either component is not finite.
    pub fn set_handle_offset(&mut self, id: ControlPointId, side: HandleSide, dx: f64, dy: f64) -> Result<()> {
        let dx = ensure_finite("dx", dx)?;
        let dy = ensure_finite("dy", dy)?;
        self.apply_handle_edit(id, side, dx.hypot(dy), dy.atan2(dx));
        Ok(())
    }

    /// Sets a handle's polar offset directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius or angle is not finite.
    pub fn set_handle_polar(&mut self, id: ControlPointId, side: HandleSide, radius: f64, angle: f64) -> Result<()> {
        let radius = ensure_finite("radius", radius)?;
        let angle = ensure_finite("angle", angle)?;
        self.apply_handle_edit(id, side, radius, angle);
        Ok(())
    }

    /// Changes the type of the segment starting at `id`.
    ///
    /// Both handles of the point are re-pinned to match, then the symmetry of
    /// this point and of the next one (whose incoming segment changed) are
    /// re-validated against the new neighbourhood.
    pub fn set_segment_type(&mut self, id: ControlPointId, segment_type: SegmentType) {
        let Some(index) = self.index_of(id) else {
            debug!(?id, "set_segment_type: point not found");
            return;
        };
        let Some(point) = self.point_mut(id) else {
            return;
        };
        point.set_segment_type(segment_type);
        let symmetry = point.symmetry();
        self.set_symmetry(id, symmetry);

        if let Some(next) = self.id_at(index + 1) {
            if let Some(next_symmetry) = self.points.get(next).map(ControlPoint::symmetry) {
                self.set_symmetry(next, next_symmetry);
            }
        }
    }

    /// Requests a symmetry for `id`; the stored value may be downgraded.
    ///
    /// - First and last points store the request as-is.
    /// - A point between two linear segments becomes [`Symmetry::Broken`].
    /// - [`Symmetry::Mirrored`] needs Bezier segments on both sides, otherwise
    ///   it becomes [`Symmetry::Aligned`].
    pub fn set_symmetry(&mut self, id: ControlPointId, requested: Symmetry) {
        let Some(index) = self.index_of(id) else {
            debug!(?id, "set_symmetry: point not found");
            return;
        };
        let resolved = self.resolve_symmetry(index, requested);
        if resolved != requested {
            debug!(?id, ?requested, ?resolved, "symmetry downgraded");
        }
        if let Some(point) = self.point_mut(id) {
            point.set_symmetry(resolved);
            apply_symmetry(point);
        }
        self.enforce_linear_constraint(id);
    }

    /// Re-establishes pins, symmetry and linear handle directions for every
    /// point. Structural edits do not do this on their own.
    pub fn refresh_constraints(&mut self) {
        for index in 0..self.order.len() {
            let id = self.order[index];
            let requested = match self.point_mut(id) {
                Some(point) => {
                    let segment_type = point.segment_type();
                    point.set_segment_type(segment_type);
                    point.symmetry()
                }
                None => continue,
            };
            let resolved = self.resolve_symmetry(index, requested);
            if let Some(point) = self.point_mut(id) {
                point.set_symmetry(resolved);
            }
        }
        for index in 0..self.order.len() {
            let id = self.order[index];
            self.enforce_linear_constraint(id);
        }
    }

    // --- Internals ---

    pub(crate) fn point_mut(&mut self, id: ControlPointId) -> Option<&mut ControlPoint> {
        self.points.get_mut(id)
    }

    fn apply_handle_edit(&mut self, id: ControlPointId, side: HandleSide, radius: f64, angle: f64) {
        let Some(point) = self.point_mut(id) else {
            debug!(?id, ?side, "handle edit: point not found");
            return;
        };
        let active_pinned = point.handle(side).is_pinned();
        let opposite_pinned = point.handle(side.opposite()).is_pinned();
        let symmetry = point.symmetry();

        let active = point.handle_mut(side);
        active.set_radius(radius);
        if !opposite_pinned {
            active.set_angle(angle);
        }

        if !active_pinned && !opposite_pinned {
            let other = point.handle_mut(side.opposite());
            match symmetry {
                Symmetry::Aligned => other.set_angle(angle + PI),
                Symmetry::Mirrored => other.set_polar(radius, angle + PI),
                Symmetry::Broken => {}
            }
        }

        self.enforce_linear_constraint(id);
    }
}

/// Snaps the in-handle opposite the out-handle when both are free and the
/// point is aligned or mirrored.
fn apply_symmetry(point: &mut ControlPoint) {
    if point.handle_in().is_pinned() || point.handle_out().is_pinned() {
        return;
    }
    let symmetry = point.symmetry();
    let (radius, angle) = point.handle_out().polar();
    let handle_in = point.handle_mut(HandleSide::In);
    match symmetry {
        Symmetry::Aligned => handle_in.set_angle(angle + PI),
        Symmetry::Mirrored => handle_in.set_polar(radius, angle + PI),
        Symmetry::Broken => {}
    }
}
