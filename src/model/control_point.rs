use std::f64::consts::FRAC_PI_2;

use crate::error::{ensure_finite, Result};
use crate::math::angle::normalize_angle;
use crate::math::{Point2, Vector2};

use super::handle::Handle;
use super::{sanitize_name, HandleSide, SegmentType, Symmetry};

const DEFAULT_NAME: &str = "Control Point";
const DEFAULT_HANDLE_RADIUS: f64 = 10.0;

/// An anchor of a trajectory together with its two tangent handles.
///
/// Setters only touch this point. Anything that depends on neighbours
/// (pinned handle directions, symmetry downgrades) is the owning
/// [`Trajectory`](super::Trajectory)'s job, which is why a point that lives
/// inside a trajectory is only handed out by shared reference.
///
/// Pinning is driven by the segment type: a [`SegmentType::Linear`] point has
/// both handles pinned, any other point has both handles free.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    name: String,
    position: Point2,
    heading: Option<f64>,
    segment_type: SegmentType,
    symmetry: Symmetry,
    handle_in: Handle,
    handle_out: Handle,
    locked: bool,
    is_event: bool,
}

impl ControlPoint {
    /// Creates a Bezier point with aligned default handles at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if either coordinate is not finite.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        let position = Point2::new(ensure_finite("x", x)?, ensure_finite("y", y)?);
        Ok(Self {
            name: DEFAULT_NAME.to_owned(),
            position,
            heading: None,
            segment_type: SegmentType::default(),
            symmetry: Symmetry::default(),
            handle_in: Handle::new(DEFAULT_HANDLE_RADIUS, -FRAC_PI_2),
            handle_out: Handle::new(DEFAULT_HANDLE_RADIUS, FRAC_PI_2),
            locked: false,
            is_event: false,
        })
    }

    // --- Accessors ---

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn position(&self) -> Point2 {
        self.position
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Authored heading in radians, `None` if the heading is inherited.
    #[must_use]
    pub fn heading(&self) -> Option<f64> {
        self.heading
    }

    #[must_use]
    pub fn segment_type(&self) -> SegmentType {
        self.segment_type
    }

    #[must_use]
    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    #[must_use]
    pub fn handle_in(&self) -> &Handle {
        &self.handle_in
    }

    #[must_use]
    pub fn handle_out(&self) -> &Handle {
        &self.handle_out
    }

    #[must_use]
    pub fn handle(&self, side: HandleSide) -> &Handle {
        match side {
            HandleSide::In => &self.handle_in,
            HandleSide::Out => &self.handle_out,
        }
    }

    /// Absolute position of the handle tip on `side`.
    #[must_use]
    pub fn handle_position(&self, side: HandleSide) -> Point2 {
        self.handle(side).absolute(&self.position)
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn is_event(&self) -> bool {
        self.is_event
    }

    // --- Mutators ---

    pub fn set_name(&mut self, name: &str) {
        self.name = sanitize_name(name, DEFAULT_NAME);
    }

    /// Moves the anchor. Handles follow since they are stored relative to it.
    ///
    /// # Errors
    ///
    /// Returns an error if either coordinate is not finite; the point is left
    /// unchanged.
    pub fn set_position(&mut self, x: f64, y: f64) -> Result<()> {
        let x = ensure_finite("x", x)?;
        let y = ensure_finite("y", y)?;
        self.position = Point2::new(x, y);
        Ok(())
    }

    /// Moves the anchor by `(dx, dy)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset or the resulting position is not finite.
    pub fn offset_position(&mut self, dx: f64, dy: f64) -> Result<()> {
        let delta = Vector2::new(ensure_finite("dx", dx)?, ensure_finite("dy", dy)?);
        let target = self.position + delta;
        self.set_position(target.x, target.y)
    }

    /// Sets or clears the authored heading, normalized to `(-π, π]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the heading is not finite.
    pub fn set_heading(&mut self, heading: Option<f64>) -> Result<()> {
        self.heading = match heading {
            Some(h) => Some(normalize_angle(ensure_finite("heading", h)?)),
            None => None,
        };
        Ok(())
    }

    /// Sets the segment type and re-pins both handles to match it.
    pub fn set_segment_type(&mut self, segment_type: SegmentType) {
        self.segment_type = segment_type;
        self.sync_pins();
    }

    /// Stores `symmetry` verbatim; context-dependent downgrades happen in the
    /// trajectory.
    pub fn set_symmetry(&mut self, symmetry: Symmetry) {
        self.symmetry = symmetry;
    }

    /// Replaces the in-handle. Its pin flag is overridden by the segment type.
    pub fn set_handle_in(&mut self, handle: Handle) {
        self.handle_in = handle;
        self.sync_pins();
    }

    /// Replaces the out-handle. Its pin flag is overridden by the segment type.
    pub fn set_handle_out(&mut self, handle: Handle) {
        self.handle_out = handle;
        self.sync_pins();
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn set_is_event(&mut self, is_event: bool) {
        self.is_event = is_event;
    }

    pub(crate) fn handle_mut(&mut self, side: HandleSide) -> &mut Handle {
        match side {
            HandleSide::In => &mut self.handle_in,
            HandleSide::Out => &mut self.handle_out,
        }
    }

    fn sync_pins(&mut self) {
        let pinned = self.segment_type == SegmentType::Linear;
        self.handle_in.set_pinned(pinned);
        self.handle_out.set_pinned(pinned);
    }
}
