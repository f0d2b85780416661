//! Conversion between the configurable user frame and the canonical frame.
//!
//! The canonical frame is the renderer's: +X right, +Y down, angles in degrees
//! clockwise from +X. The user frame is whatever axis convention the project
//! is configured with. Renderers place trajectory geometry inside a group
//! carrying [`GroupTransform`], so user coordinates and group-local rotations
//! are what they hand to the drawing layer.

pub mod units;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ensure_finite, ensure_positive, ArgumentError, Result};
use crate::math::{Matrix2, Point2, Vector2};

/// A screen direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Canonical angle of this direction, in quarter turns clockwise from +X.
    #[must_use]
    pub fn quarter_turns(self) -> i32 {
        match self {
            Self::Right => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Up => 3,
        }
    }

    /// Canonical angle of this direction in degrees: 0, 90, 180 or 270.
    #[must_use]
    pub fn canonical_degrees(self) -> f64 {
        f64::from(self.quarter_turns() * 90)
    }

    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

/// Sense in which user headings increase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RotationDirection {
    #[default]
    Cw,
    Ccw,
}

/// Axis convention of the user frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoordinateConfig {
    pub positive_x: Direction,
    pub positive_y: Direction,
    pub zero_angle: Direction,
    pub rotation: RotationDirection,
}

impl Default for CoordinateConfig {
    fn default() -> Self {
        Self {
            positive_x: Direction::Right,
            positive_y: Direction::Down,
            zero_angle: Direction::Right,
            rotation: RotationDirection::Cw,
        }
    }
}

impl CoordinateConfig {
    /// Checks that +X and +Y lie on different axes.
    ///
    /// [`CoordinateSystem::new`] accepts any combination; this check is for
    /// collaborators that collect the four values from user input.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::AxisConflict`] when both are horizontal or
    /// both are vertical.
    pub fn validate(&self) -> std::result::Result<(), ArgumentError> {
        if self.positive_x.is_horizontal() == self.positive_y.is_horizontal() {
            return Err(ArgumentError::AxisConflict {
                x: self.positive_x.name(),
                y: self.positive_y.name(),
            });
        }
        Ok(())
    }
}

/// Transform a renderer applies to the group holding user-frame geometry:
/// rotate by `rotation_deg`, then scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupTransform {
    pub rotation_deg: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

/// Converts positions and headings between a user frame and the canonical
/// frame. All derived constants are fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSystem {
    group_rotation_deg: f64,
    vertical_flip: f64,
    zero_angle_deg: f64,
    direction_multiplier: f64,
    rotation: Matrix2,
}

impl Default for CoordinateSystem {
    fn default() -> Self {
        Self::new(&CoordinateConfig::default())
    }
}

impl CoordinateSystem {
    #[must_use]
    pub fn new(config: &CoordinateConfig) -> Self {
        let turns = config.positive_x.quarter_turns();
        let relative_y = (config.positive_y.quarter_turns() - turns).rem_euclid(4);
        let vertical_flip = if relative_y == 1 { 1.0 } else { -1.0 };
        let direction_multiplier = match config.rotation {
            RotationDirection::Cw => 1.0,
            RotationDirection::Ccw => -1.0,
        };

        Self {
            group_rotation_deg: config.positive_x.canonical_degrees(),
            vertical_flip,
            zero_angle_deg: config.zero_angle.canonical_degrees(),
            direction_multiplier,
            rotation: quarter_turn_matrix(turns),
        }
    }

    #[must_use]
    pub fn group_rotation_deg(&self) -> f64 {
        self.group_rotation_deg
    }

    /// `1.0` when user +Y is a quarter turn clockwise from user +X, else `-1.0`.
    #[must_use]
    pub fn vertical_flip(&self) -> f64 {
        self.vertical_flip
    }

    #[must_use]
    pub fn zero_angle_deg(&self) -> f64 {
        self.zero_angle_deg
    }

    #[must_use]
    pub fn direction_multiplier(&self) -> f64 {
        self.direction_multiplier
    }

    #[must_use]
    pub fn group_transform(&self) -> GroupTransform {
        GroupTransform {
            rotation_deg: self.group_rotation_deg,
            scale_x: 1.0,
            scale_y: self.vertical_flip,
        }
    }

    /// Canonical → user: undo the flip, then rotate by the negative group
    /// rotation.
    #[must_use]
    pub fn to_user(&self, canonical: &Point2) -> Point2 {
        let flipped = Vector2::new(canonical.x, canonical.y * self.vertical_flip);
        Point2::from(self.rotation.transpose() * flipped)
    }

    /// User → canonical: rotate by the group rotation, then flip.
    #[must_use]
    pub fn from_user(&self, user: &Point2) -> Point2 {
        let rotated = self.rotation * user.coords;
        Point2::new(rotated.x, rotated.y * self.vertical_flip)
    }

    /// Converts a user heading (radians) to the rotation, in degrees, that a
    /// glyph inside the group transform needs in order to point along it.
    #[must_use]
    pub fn heading_to_canonical_degrees(&self, heading: f64) -> f64 {
        let target = self.zero_angle_deg + self.direction_multiplier * heading.to_degrees();
        (target - self.group_rotation_deg) * self.vertical_flip
    }

    /// Inverse of [`CoordinateSystem::heading_to_canonical_degrees`], up to a
    /// whole turn. The result is not normalized.
    #[must_use]
    pub fn heading_from_canonical_degrees(&self, degrees: f64) -> f64 {
        let visual = self.group_rotation_deg + self.vertical_flip * degrees;
        ((visual - self.zero_angle_deg) * self.direction_multiplier).to_radians()
    }

    /// Canonical direction (degrees clockwise from screen +X) of a user
    /// heading. This is what the viewer sees, regardless of the group
    /// transform.
    #[must_use]
    pub fn heading_to_screen_degrees(&self, heading: f64) -> f64 {
        self.zero_angle_deg + self.direction_multiplier * heading.to_degrees()
    }
}

/// Exact rotation by `turns` quarter turns clockwise on screen.
fn quarter_turn_matrix(turns: i32) -> Matrix2 {
    let (c, s) = match turns.rem_euclid(4) {
        0 => (1.0, 0.0),
        1 => (0.0, 1.0),
        2 => (-1.0, 0.0),
        _ => (0.0, -1.0),
    };
    Matrix2::new(c, -s, s, c)
}

/// Pan and zoom of the canvas: pixel = origin + canonical × scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    origin_x: f64,
    origin_y: f64,
    scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            scale: 1.0,
        }
    }
}

impl Viewport {
    /// # Errors
    ///
    /// Returns an error if the origin is not finite or the scale is not a
    /// positive finite number.
    pub fn new(origin_x: f64, origin_y: f64, scale: f64) -> Result<Self> {
        Ok(Self {
            origin_x: ensure_finite("origin_x", origin_x)?,
            origin_y: ensure_finite("origin_y", origin_y)?,
            scale: ensure_positive("scale", scale)?,
        })
    }

    #[must_use]
    pub fn origin(&self) -> Point2 {
        Point2::new(self.origin_x, self.origin_y)
    }

    /// Pixels per canonical unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn screen_to_canonical(&self, screen: &Point2) -> Point2 {
        Point2::new(
            (screen.x - self.origin_x) / self.scale,
            (screen.y - self.origin_y) / self.scale,
        )
    }

    #[must_use]
    pub fn canonical_to_screen(&self, canonical: &Point2) -> Point2 {
        Point2::new(
            self.origin_x + canonical.x * self.scale,
            self.origin_y + canonical.y * self.scale,
        )
    }

    /// Pointer position in pixels → user coordinates.
    #[must_use]
    pub fn screen_to_user(&self, screen: &Point2, coords: &CoordinateSystem) -> Point2 {
        coords.to_user(&self.screen_to_canonical(screen))
    }

    #[must_use]
    pub fn user_to_screen(&self, user: &Point2, coords: &CoordinateSystem) -> Point2 {
        self.canonical_to_screen(&coords.from_user(user))
    }

    /// Zooms by `factor` keeping the canonical point under `screen` fixed.
    /// Non-positive or non-finite factors are ignored, as is any zoom whose
    /// resulting scale would overflow or underflow to zero.
    pub fn zoom_about(&mut self, screen: &Point2, factor: f64) {
        let scale = self.scale * factor;
        if !factor.is_finite() || !scale.is_finite() || scale <= 0.0 {
            debug!(factor, scale = self.scale, "zoom ignored: scale would leave the positive finite range");
            return;
        }
        let anchor = self.screen_to_canonical(screen);
        let origin_x = screen.x - anchor.x * scale;
        let origin_y = screen.y - anchor.y * scale;
        if !origin_x.is_finite() || !origin_y.is_finite() {
            debug!(factor, "zoom ignored: origin would overflow");
            return;
        }
        self.scale = scale;
        self.origin_x = origin_x;
        self.origin_y = origin_y;
    }

    /// Pans by a pixel delta. Non-finite deltas are ignored.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.origin_x += dx;
            self.origin_y += dy;
        }
    }
}
