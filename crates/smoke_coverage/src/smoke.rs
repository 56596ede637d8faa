//! Smokes: thrown area-denial items and their computed coverage.
use std::fmt;

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::doorway::Doorway;
use crate::error::{Error, Result};
use crate::geometry::Circle;

/// Match metadata carried through the analysis for grouping statistics.
///
/// None of these fields influence assignment or coverage.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmokeMeta {
    /// Identifier of the match replay the throw came from.
    pub source_id: String,
    pub thrower: String,
    pub team: String,
    pub side: String,
    pub round: u32,
    /// Round clock at the moment of the throw, as recorded by the parser.
    pub throw_time: String,
    /// Whether the thrower's side won the round.
    pub round_won: bool,
}

/// A smoke landing position with its assignment state.
///
/// A smoke is written at most twice: once when it is assigned to a doorway and once when
/// its coverage is recorded. Both transitions are performed by [`crate::assign`].
#[derive(Debug, Clone, PartialEq)]
pub struct Smoke {
    pub meta: SmokeMeta,
    position: DVec2,
    elevation: f64,
    radius: f64,
    doorway: Option<usize>,
    coverage: Option<f64>,
}

impl Smoke {
    /// Creates an unassigned smoke; the radius comes from `config`, which must validate.
    pub fn new(
        meta: SmokeMeta,
        position: impl Into<DVec2>,
        elevation: f64,
        config: &AnalysisConfig,
    ) -> Result<Self> {
        config.validate()?;
        let position = position.into();
        if !position.is_finite() || !elevation.is_finite() {
            return Err(Error::NonFiniteCoordinate {
                context: format!("smoke thrown by '{}' in round {}", meta.thrower, meta.round),
            });
        }

        Ok(Self {
            meta,
            position,
            elevation,
            radius: config.smoke_radius_units,
            doorway: None,
            coverage: None,
        })
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }

    /// Index of the assigned doorway within the run that produced this smoke.
    pub fn assigned_doorway(&self) -> Option<usize> {
        self.doorway
    }

    /// Coverage percentage in `[0, 100]`, once computed.
    pub fn coverage(&self) -> Option<f64> {
        self.coverage
    }

    /// Distance in world units from the landing position to the doorway's raw midpoint.
    pub fn distance_to_midpoint(&self, doorway: &Doorway) -> f64 {
        self.position.distance(doorway.midpoint())
    }

    /// Console command that draws a cross where the smoke landed.
    pub fn draw_command(&self) -> String {
        format!(
            "drawcross {} {} {}",
            self.position.x, self.position.y, self.elevation
        )
    }

    pub(crate) fn assign(&mut self, doorway: usize) -> Result<()> {
        if self.doorway.is_some() {
            return Err(Error::AlreadyAssigned {
                smoke: self.to_string(),
            });
        }
        self.doorway = Some(doorway);
        Ok(())
    }

    pub(crate) fn record_coverage(&mut self, percent: f64) -> Result<()> {
        if self.doorway.is_none() {
            return Err(Error::CoverageBeforeAssignment {
                smoke: self.to_string(),
            });
        }
        if self.coverage.is_some() {
            return Err(Error::CoverageAlreadyRecorded {
                smoke: self.to_string(),
            });
        }
        self.coverage = Some(percent.clamp(0.0, 100.0));
        Ok(())
    }
}

impl fmt::Display for Smoke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Smoke[(x, y, z) => ({}, {}, {})]",
            self.position.x, self.position.y, self.elevation
        )
    }
}
