//! Display and export units. Internally every length is metres and every
//! angle radians.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistanceUnit {
    #[default]
    Meters,
    Inches,
    Feet,
    /// A user-defined multiple of a built-in unit; see [`CustomDistance`].
    Custom,
}

impl DistanceUnit {
    /// Metres per one of this unit. [`DistanceUnit::Custom`] without a
    /// definition counts as metres.
    #[must_use]
    pub fn meters_per_unit(self) -> f64 {
        match self {
            Self::Meters | Self::Custom => 1.0,
            Self::Inches => 0.0254,
            Self::Feet => 0.3048,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
    Rotations,
}

impl AngleUnit {
    #[must_use]
    pub fn radians_per_unit(self) -> f64 {
        match self {
            Self::Degrees => PI / 180.0,
            Self::Radians => 1.0,
            Self::Rotations => TAU,
        }
    }
}

/// A custom distance unit: `factor` times `base_unit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDistance {
    pub factor: f64,
    #[serde(default)]
    pub base_unit: DistanceUnit,
}

impl CustomDistance {
    /// Metres per custom unit. A non-positive or non-finite factor counts as 1.
    #[must_use]
    pub fn meters_per_unit(&self) -> f64 {
        let factor = if self.factor.is_finite() && self.factor > 0.0 {
            self.factor
        } else {
            1.0
        };
        factor * self.base_unit.meters_per_unit()
    }
}

/// Units shown to the user and written by exporters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnitConfig {
    pub distance: DistanceUnit,
    pub angle: AngleUnit,
    pub custom_distance: Option<CustomDistance>,
}

impl UnitConfig {
    fn meters_per_unit(&self) -> f64 {
        match (self.distance, self.custom_distance) {
            (DistanceUnit::Custom, Some(custom)) => custom.meters_per_unit(),
            (unit, _) => unit.meters_per_unit(),
        }
    }

    #[must_use]
    pub fn meters_to_distance(&self, meters: f64) -> f64 {
        meters / self.meters_per_unit()
    }

    #[must_use]
    pub fn distance_to_meters(&self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }

    #[must_use]
    pub fn radians_to_angle(&self, radians: f64) -> f64 {
        radians / self.angle.radians_per_unit()
    }

    #[must_use]
    pub fn angle_to_radians(&self, value: f64) -> f64 {
        value * self.angle.radians_per_unit()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn inches_and_feet() {
        let inches = UnitConfig {
            distance: DistanceUnit::Inches,
            ..UnitConfig::default()
        };
        assert_relative_eq!(inches.meters_to_distance(1.0), 39.370_078_740_157_48, epsilon = 1e-9);
        let feet = UnitConfig {
            distance: DistanceUnit::Feet,
            ..UnitConfig::default()
        };
        assert_relative_eq!(feet.distance_to_meters(10.0), 3.048, epsilon = 1e-12);
    }

    #[test]
    fn angle_units() {
        let rotations = UnitConfig {
            angle: AngleUnit::Rotations,
            ..UnitConfig::default()
        };
        assert_relative_eq!(rotations.radians_to_angle(PI), 0.5);
        assert_relative_eq!(UnitConfig::default().angle_to_radians(90.0), PI / 2.0);
    }

    #[test]
    fn custom_distance_uses_base_unit() {
        let tiles = UnitConfig {
            distance: DistanceUnit::Custom,
            custom_distance: Some(CustomDistance {
                factor: 24.0,
                base_unit: DistanceUnit::Inches,
            }),
            ..UnitConfig::default()
        };
        assert_relative_eq!(tiles.distance_to_meters(1.0), 0.6096, epsilon = 1e-12);
    }

    #[test]
    fn bad_custom_factor_counts_as_one() {
        let custom = CustomDistance {
            factor: -2.0,
            base_unit: DistanceUnit::Feet,
        };
        assert_relative_eq!(custom.meters_per_unit(), 0.3048);
    }

    #[test]
    fn parses_from_json() {
        let units: UnitConfig =
            serde_json::from_str(r#"{"distance":"FEET","angle":"RADIANS"}"#).unwrap();
        assert_eq!(units.distance, DistanceUnit::Feet);
        assert_eq!(units.angle, AngleUnit::Radians);
        assert!(units.custom_distance.is_none());
    }
}
