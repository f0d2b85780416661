//! Engine-wide settings, as a project file or settings panel would supply
//! them. Every section falls back to its default when missing.

use serde::{Deserialize, Serialize};

use crate::coords::units::UnitConfig;
use crate::coords::{CoordinateConfig, CoordinateSystem};
use crate::sampling::{SampleCurve, SamplingParams};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub coordinates: CoordinateConfig,
    pub sampling: SamplingParams,
    pub units: UnitConfig,
}

impl EngineConfig {
    #[must_use]
    pub fn coordinate_system(&self) -> CoordinateSystem {
        CoordinateSystem::new(&self.coordinates)
    }

    /// A sampler using these sampling parameters.
    #[must_use]
    pub fn sampler(&self) -> SampleCurve {
        SampleCurve::new(self.sampling)
    }
}
