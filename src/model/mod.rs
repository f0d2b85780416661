pub mod control_point;
pub mod handle;
pub mod snapshot;
pub mod trajectory;

pub use control_point::ControlPoint;
pub use handle::Handle;
pub use snapshot::{ControlPointSnapshot, HandleSnapshot, TrajectorySnapshot};
pub use trajectory::{Color, Trajectory};

use serde::{Deserialize, Serialize};

slotmap::new_key_type! {
    /// Unique identifier for a control point within its trajectory.
    pub struct ControlPointId;
}

/// Which of a control point's two handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandleSide {
    /// Tangent handle for the segment arriving at the point.
    In,
    /// Tangent handle for the segment leaving the point.
    Out,
}

impl HandleSide {
    /// Returns the other handle of the same point.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::In => Self::Out,
            Self::Out => Self::In,
        }
    }
}

/// Identifier of a handle: the owning point plus which side it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId {
    pub point: ControlPointId,
    pub side: HandleSide,
}

impl HandleId {
    /// Creates a handle id.
    #[must_use]
    pub fn new(point: ControlPointId, side: HandleSide) -> Self {
        Self { point, side }
    }
}

/// Shape of the segment that starts at a control point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SegmentType {
    /// Straight line to the next point; both handles are pinned.
    Linear,
    /// Cubic Bezier using this point's out-handle and the next point's in-handle.
    #[default]
    Bezier,
    /// Reserved curve family; rendered and sampled as a straight line.
    Clothoid,
}

/// How a control point's two handles are tied together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Symmetry {
    /// Handles move independently.
    Broken,
    /// Handles stay collinear, radii independent.
    #[default]
    Aligned,
    /// Handles stay collinear with equal radii.
    Mirrored,
}

/// How an exporter should distribute generated poses. Carried, not consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterpolationMode {
    #[default]
    Equidistant,
    Uniform,
}

/// Trims a display name to at most 100 characters, substituting `fallback`
/// for blank input.
pub(crate) fn sanitize_name(name: &str, fallback: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return fallback.to_owned();
    }
    trimmed.chars().take(100).collect()
}
