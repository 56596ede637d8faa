//! Doorways: fixed chokepoints a smoke can block.
use std::fmt;

use glam::DVec2;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::geometry::{point_in_circle, Segment};
use crate::smoke::Smoke;

pub type DoorwayId = String;

/// A chokepoint line plus the detection zone used to decide which smokes belong to it.
///
/// The covered segment is the raw segment inflated by half the configured hull width on
/// each side, so the doorway models the corridor a character occupies rather than a
/// zero-width line. The midpoint always comes from the raw endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Doorway {
    name: DoorwayId,
    raw: Segment,
    inflated: Segment,
    midpoint: DVec2,
    length: f64,
    elevation: f64,
    detection_radius: f64,
    elevation_tolerance: f64,
}

impl Doorway {
    /// Builds a doorway from raw map endpoints and the source elevation.
    ///
    /// The stored elevation is `source_elevation - config.elevation_offset_units`.
    /// Fails with [`Error::DegenerateGeometry`] when the endpoints coincide and with
    /// [`Error::NonFiniteCoordinate`] for NaN or infinite input. An invalid `config` is
    /// rejected with [`Error::InvalidConfig`].
    pub fn new(
        name: impl Into<DoorwayId>,
        a: impl Into<DVec2>,
        b: impl Into<DVec2>,
        source_elevation: f64,
        config: &AnalysisConfig,
    ) -> Result<Self> {
        config.validate()?;
        let name = name.into();
        let raw = Segment::new(a, b);
        if !raw.is_finite() || !source_elevation.is_finite() {
            return Err(Error::NonFiniteCoordinate {
                context: format!("doorway '{name}'"),
            });
        }

        let inflated = raw
            .extended(config.hull_width_units * 0.5)
            .ok_or_else(|| Error::DegenerateGeometry {
                doorway: name.clone(),
            })?;

        Ok(Self {
            midpoint: raw.midpoint(),
            length: inflated.length(),
            elevation: source_elevation - config.elevation_offset_units,
            detection_radius: config.detection_radius_units,
            elevation_tolerance: config.height_tolerance_units,
            name,
            raw,
            inflated,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Endpoints as recorded on the map.
    pub fn raw_segment(&self) -> Segment {
        self.raw
    }

    /// Endpoints after hull-width inflation; this is what coverage is measured against.
    pub fn segment(&self) -> Segment {
        self.inflated
    }

    /// Midpoint of the raw endpoints.
    pub fn midpoint(&self) -> DVec2 {
        self.midpoint
    }

    /// Length of the inflated segment.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn detection_radius(&self) -> f64 {
        self.detection_radius
    }

    pub fn elevation_tolerance(&self) -> f64 {
        self.elevation_tolerance
    }

    /// Whether a smoke landed inside this doorway's detection zone.
    ///
    /// Requires the smoke to be strictly within the detection radius of the midpoint and
    /// inside the inclusive elevation band.
    pub fn is_in_range(&self, smoke: &Smoke) -> bool {
        if !point_in_circle(smoke.position(), self.midpoint, self.detection_radius) {
            debug!("{smoke} not within detection radius of {self}.");
            return false;
        }

        let low = self.elevation - self.elevation_tolerance;
        let high = self.elevation + self.elevation_tolerance;
        if !(low..=high).contains(&smoke.elevation()) {
            debug!("{smoke} within detection radius of {self} but outside elevation band.");
            return false;
        }

        debug!("{smoke} in detection zone of {self}.");
        true
    }

    /// Console command that draws the inflated doorway line in-game.
    pub fn draw_command(&self) -> String {
        let Segment { start, end } = self.inflated;
        let z = self.elevation;
        format!(
            "drawline {} {} {z} {} {} {z}",
            start.x, start.y, end.x, end.y
        )
    }
}

impl fmt::Display for Doorway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => write!(
                f,
                "Doorway({}{})",
                first.to_uppercase(),
                chars.as_str().to_lowercase()
            ),
            None => f.write_str("Doorway()"),
        }
    }
}
