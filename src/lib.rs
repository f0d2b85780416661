//! Geometry and constraint-propagation engine for piecewise Bezier
//! trajectories.
//!
//! A [`Trajectory`] is an ordered run of [`ControlPoint`]s joined by straight
//! or cubic segments. Every geometric edit goes through the trajectory so that
//! handles on straight segments keep pointing at their neighbours. The
//! [`sampling`] operations turn a trajectory into drawing commands and evenly
//! spaced poses, and [`CoordinateSystem`] maps between the configured user
//! frame and the renderer's canonical frame.

pub mod config;
pub mod coords;
pub mod error;
pub mod math;
pub mod model;
pub mod sampling;
pub mod store;

pub use config::EngineConfig;
pub use coords::{CoordinateConfig, CoordinateSystem, Viewport};
pub use error::{Result, TrajectraError};
pub use model::{ControlPoint, ControlPointId, Handle, HandleId, HandleSide, SegmentType, Symmetry, Trajectory};
pub use sampling::{BuildPath, CurvePoint, HandleResolver, NearestSegment, SampleCurve, SamplingParams};
pub use store::{TrajectoryId, TrajectoryStore};
