use crate::math::angle::normalize_angle;
use crate::math::{polar_offset, Point2};

/// Tangent handle of a control point, stored as a polar offset from its anchor.
///
/// Every write goes through the clamping accessors: the radius never drops
/// below [`Handle::MIN_RADIUS`], the angle always lies in `(-π, π]`, and
/// non-finite input degrades to the safe default instead of producing `NaN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    radius: f64,
    angle: f64,
    pinned: bool,
}

impl Handle {
    /// Smallest admissible radius.
    pub const MIN_RADIUS: f64 = 1e-4;

    /// Creates a free handle with the given polar offset.
    #[must_use]
    pub fn new(radius: f64, angle: f64) -> Self {
        Self {
            radius: clamp_radius(radius),
            angle: normalize_angle(angle),
            pinned: false,
        }
    }

    /// Distance from the anchor.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Direction from the anchor, in `(-π, π]`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Returns `(radius, angle)`.
    #[must_use]
    pub fn polar(&self) -> (f64, f64) {
        (self.radius, self.angle)
    }

    /// Whether the angle is derived from the adjacent anchor.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Absolute position of the handle tip for an anchor at `anchor`.
    #[must_use]
    pub fn absolute(&self, anchor: &Point2) -> Point2 {
        polar_offset(anchor, self.radius, self.angle)
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = clamp_radius(radius);
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = normalize_angle(angle);
    }

    pub fn set_polar(&mut self, radius: f64, angle: f64) {
        self.set_radius(radius);
        self.set_angle(angle);
    }

    pub fn offset_radius(&mut self, delta: f64) {
        self.set_radius(self.radius + delta);
    }

    pub fn offset_angle(&mut self, delta: f64) {
        self.set_angle(self.angle + delta);
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }
}

fn clamp_radius(radius: f64) -> f64 {
    if radius.is_finite() {
        radius.max(Handle::MIN_RADIUS)
    } else {
        Handle::MIN_RADIUS
    }
}
