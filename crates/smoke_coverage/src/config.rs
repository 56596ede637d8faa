//! Analysis configuration shared by doorway, smoke and assignment construction.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Radius of a fully bloomed smoke in world units.
pub const DEFAULT_SMOKE_RADIUS_UNITS: f64 = 144.0;
/// Width of a standing character's collision hull in world units.
pub const DEFAULT_HULL_WIDTH_UNITS: f64 = 32.0;
/// One world unit in meters.
pub const DEFAULT_UNIT_TO_METERS: f64 = 0.01905;
/// Offset between a doorway's recorded height and the height smokes settle at.
pub const DEFAULT_ELEVATION_OFFSET_UNITS: f64 = 64.093811;

/// Immutable configuration for a coverage analysis run.
///
/// Built once and passed by reference into [`crate::doorway::Doorway::new`],
/// [`crate::smoke::Smoke::new`] and the record loaders.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Radius of every smoke in world units.
    pub smoke_radius_units: f64,
    /// Radius of the detection zone around a doorway midpoint.
    pub detection_radius_units: f64,
    /// Maximum vertical distance between a smoke and a doorway's elevation.
    pub height_tolerance_units: f64,
    /// Character hull width; doorways are extended by half of it on each side.
    pub hull_width_units: f64,
    /// Scale from world units to meters.
    pub unit_to_meters: f64,
    /// Subtracted from the source elevation of each doorway.
    pub elevation_offset_units: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            smoke_radius_units: DEFAULT_SMOKE_RADIUS_UNITS,
            detection_radius_units: 300.0,
            height_tolerance_units: 100.0,
            hull_width_units: DEFAULT_HULL_WIDTH_UNITS,
            unit_to_meters: DEFAULT_UNIT_TO_METERS,
            elevation_offset_units: DEFAULT_ELEVATION_OFFSET_UNITS,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new [`AnalysisConfig`] with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the smoke radius.
    pub fn with_smoke_radius(mut self, smoke_radius_units: f64) -> Self {
        self.smoke_radius_units = smoke_radius_units;
        self
    }

    /// Sets the doorway detection radius.
    pub fn with_detection_radius(mut self, detection_radius_units: f64) -> Self {
        self.detection_radius_units = detection_radius_units;
        self
    }

    /// Sets the elevation tolerance.
    pub fn with_height_tolerance(mut self, height_tolerance_units: f64) -> Self {
        self.height_tolerance_units = height_tolerance_units;
        self
    }

    /// Sets the hull width used for doorway inflation.
    pub fn with_hull_width(mut self, hull_width_units: f64) -> Self {
        self.hull_width_units = hull_width_units;
        self
    }

    /// Sets the unit-to-meters scale.
    pub fn with_unit_to_meters(mut self, unit_to_meters: f64) -> Self {
        self.unit_to_meters = unit_to_meters;
        self
    }

    /// Sets the doorway elevation offset.
    pub fn with_elevation_offset(mut self, elevation_offset_units: f64) -> Self {
        self.elevation_offset_units = elevation_offset_units;
        self
    }

    /// Converts a distance in world units to meters.
    #[inline]
    pub fn units_to_meters(&self, units: f64) -> f64 {
        units * self.unit_to_meters
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("smoke_radius_units", self.smoke_radius_units),
            ("detection_radius_units", self.detection_radius_units),
            ("height_tolerance_units", self.height_tolerance_units),
            ("hull_width_units", self.hull_width_units),
            ("unit_to_meters", self.unit_to_meters),
            ("elevation_offset_units", self.elevation_offset_units),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("{name} must be finite")));
            }
        }
        if self.smoke_radius_units <= 0.0 {
            return Err(Error::InvalidConfig("smoke_radius_units must be > 0".into()));
        }
        if self.detection_radius_units <= 0.0 {
            return Err(Error::InvalidConfig(
                "detection_radius_units must be > 0".into(),
            ));
        }
        if self.height_tolerance_units < 0.0 {
            return Err(Error::InvalidConfig(
                "height_tolerance_units must be >= 0".into(),
            ));
        }
        if self.hull_width_units < 0.0 {
            return Err(Error::InvalidConfig("hull_width_units must be >= 0".into()));
        }
        if self.unit_to_meters <= 0.0 {
            return Err(Error::InvalidConfig("unit_to_meters must be > 0".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        AnalysisConfig::default()
            .validate()
            .expect("default config validates");
    }

    #[test]
    fn builder_sets_fields() {
        let config = AnalysisConfig::new()
            .with_smoke_radius(128.0)
            .with_detection_radius(250.0)
            .with_height_tolerance(64.0)
            .with_hull_width(0.0)
            .with_unit_to_meters(0.0254)
            .with_elevation_offset(0.0);

        assert_eq!(config.smoke_radius_units, 128.0);
        assert_eq!(config.detection_radius_units, 250.0);
        assert_eq!(config.height_tolerance_units, 64.0);
        assert_eq!(config.hull_width_units, 0.0);
        assert_eq!(config.unit_to_meters, 0.0254);
        assert_eq!(config.elevation_offset_units, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let cases = [
            AnalysisConfig::new().with_smoke_radius(0.0),
            AnalysisConfig::new().with_detection_radius(-1.0),
            AnalysisConfig::new().with_height_tolerance(-0.5),
            AnalysisConfig::new().with_hull_width(-2.0),
            AnalysisConfig::new().with_unit_to_meters(0.0),
            AnalysisConfig::new().with_elevation_offset(f64::NAN),
            AnalysisConfig::new().with_smoke_radius(f64::INFINITY),
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "expected {config:?} to be rejected"
            );
        }
    }

    #[test]
    fn units_to_meters_scales_distance() {
        let config = AnalysisConfig::default();
        assert!((config.units_to_meters(100.0) - 1.905).abs() < 1e-12);
    }
}
