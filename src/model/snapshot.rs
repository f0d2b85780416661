//! Plain-data snapshots of the model, for collaborators that persist,
//! transfer, or undo state. The snapshot shape carries no pin flags: pins are
//! derived from segment types when a snapshot is loaded.

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::control_point::ControlPoint;
use super::handle::Handle;
use super::trajectory::{Color, Trajectory};
use super::{InterpolationMode, SegmentType, Symmetry};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleSnapshot {
    pub radius: f64,
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPointSnapshot {
    #[serde(default)]
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub heading: Option<f64>,
    #[serde(default)]
    pub segment_type: SegmentType,
    #[serde(default)]
    pub symmetry: Symmetry,
    pub handle_in: HandleSnapshot,
    pub handle_out: HandleSnapshot,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub is_event: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectorySnapshot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub interpolation: InterpolationMode,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub points: Vec<ControlPointSnapshot>,
}

fn default_visible() -> bool {
    true
}

impl From<&Handle> for HandleSnapshot {
    fn from(handle: &Handle) -> Self {
        Self {
            radius: handle.radius(),
            angle: handle.angle(),
        }
    }
}

impl From<HandleSnapshot> for Handle {
    fn from(snapshot: HandleSnapshot) -> Self {
        Handle::new(snapshot.radius, snapshot.angle)
    }
}

impl ControlPoint {
    /// Rebuilds a point from a snapshot.
    ///
    /// Handle values are clamped and normalized like any other handle write.
    ///
    /// # Errors
    ///
    /// Returns an error if the position or heading is not finite.
    pub fn from_snapshot(snapshot: &ControlPointSnapshot) -> Result<Self> {
        let mut point = Self::new(snapshot.x, snapshot.y)?;
        point.set_heading(snapshot.heading)?;
        point.set_name(&snapshot.name);
        point.set_symmetry(snapshot.symmetry);
        point.set_handle_in(snapshot.handle_in.into());
        point.set_handle_out(snapshot.handle_out.into());
        point.set_segment_type(snapshot.segment_type);
        point.set_locked(snapshot.locked);
        point.set_is_event(snapshot.is_event);
        Ok(point)
    }

    #[must_use]
    pub fn to_snapshot(&self) -> ControlPointSnapshot {
        ControlPointSnapshot {
            name: self.name().to_owned(),
            x: self.x(),
            y: self.y(),
            heading: self.heading(),
            segment_type: self.segment_type(),
            symmetry: self.symmetry(),
            handle_in: self.handle_in().into(),
            handle_out: self.handle_out().into(),
            locked: self.is_locked(),
            is_event: self.is_event(),
        }
    }
}

impl Trajectory {
    /// Rebuilds a trajectory from a snapshot and settles its constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if any point has a non-finite position or heading;
    /// nothing is built in that case.
    pub fn from_snapshot(snapshot: &TrajectorySnapshot) -> Result<Self> {
        let points = snapshot
            .points
            .iter()
            .map(ControlPoint::from_snapshot)
            .collect::<Result<Vec<_>>>()?;

        let mut trajectory = Self::from_points(&snapshot.name, points);
        trajectory.set_color(Color::normalize(&snapshot.color));
        trajectory.set_interpolation(snapshot.interpolation);
        trajectory.set_visible(snapshot.visible);
        trajectory.set_locked(snapshot.locked);
        Ok(trajectory)
    }

    #[must_use]
    pub fn to_snapshot(&self) -> TrajectorySnapshot {
        TrajectorySnapshot {
            name: self.name().to_owned(),
            color: self.color().to_string(),
            interpolation: self.interpolation(),
            visible: self.is_visible(),
            locked: self.is_locked(),
            points: self.points().map(|(_, p)| p.to_snapshot()).collect(),
        }
    }
}
