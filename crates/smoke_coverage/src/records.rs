//! JSON input/output records and validation at the loading boundary.
//!
//! Two input shapes are understood:
//! - doorway definitions: an object mapping doorway names to `{x1, y1, x2, y2, z}`;
//! - smoke datasets: an array of throw records as produced by the replay parser.
//!
//! Each entry is validated on its own. A malformed entry is reported as a
//! [`RecordRejection`] and skipped; only a document whose top-level shape is wrong fails
//! the whole load.
use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::assign::Assignment;
use crate::config::AnalysisConfig;
use crate::doorway::Doorway;
use crate::error::{Error, Result};
use crate::events::{AnalysisEvent, AnalysisEventKind, EventSink};
use crate::smoke::{Smoke, SmokeMeta};

/// Raw doorway endpoints and source elevation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DoorwayRecord {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub z: f64,
}

impl DoorwayRecord {
    pub fn into_doorway(self, name: impl Into<String>, config: &AnalysisConfig) -> Result<Doorway> {
        Doorway::new(name, [self.x1, self.y1], [self.x2, self.y2], self.z, config)
    }
}

/// One smoke throw as written by the replay parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmokeRecord {
    #[serde(rename = "demoID")]
    pub demo_id: String,
    pub thrower_name: String,
    pub thrower_team: String,
    pub thrower_side: String,
    pub round_num: u32,
    pub throw_time: String,
    pub round_won: bool,
    pub grenade_x: f64,
    pub grenade_y: f64,
    pub grenade_z: f64,
}

impl SmokeRecord {
    pub fn into_smoke(self, config: &AnalysisConfig) -> Result<Smoke> {
        let meta = SmokeMeta {
            source_id: self.demo_id,
            thrower: self.thrower_name,
            team: self.thrower_team,
            side: self.thrower_side,
            round: self.round_num,
            throw_time: self.throw_time,
            round_won: self.round_won,
        };
        Smoke::new(meta, [self.grenade_x, self.grenade_y], self.grenade_z, config)
    }
}

impl From<&Smoke> for SmokeRecord {
    fn from(smoke: &Smoke) -> Self {
        let meta = &smoke.meta;
        Self {
            demo_id: meta.source_id.clone(),
            thrower_name: meta.thrower.clone(),
            thrower_team: meta.team.clone(),
            thrower_side: meta.side.clone(),
            round_num: meta.round,
            throw_time: meta.throw_time.clone(),
            round_won: meta.round_won,
            grenade_x: smoke.position().x,
            grenade_y: smoke.position().y,
            grenade_z: smoke.elevation(),
        }
    }
}

/// A smoke record together with its assignment outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageRecord {
    #[serde(flatten)]
    pub smoke: SmokeRecord,
    pub doorway: String,
    pub coverage: f64,
}

/// One output row per assigned smoke, in input order.
pub fn coverage_records(assignment: &Assignment) -> Vec<CoverageRecord> {
    assignment
        .pairs()
        .filter_map(|(doorway, smoke)| {
            smoke.coverage().map(|coverage| CoverageRecord {
                smoke: SmokeRecord::from(smoke),
                doorway: doorway.name().to_owned(),
                coverage,
            })
        })
        .collect()
}

/// Why a single input entry was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRejection {
    /// Position of the entry in its document.
    pub index: usize,
    /// Doorway name, for keyed documents.
    pub key: Option<String>,
    pub reason: String,
}

/// Entities built from a document plus the entries that were rejected.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub rejected: Vec<RecordRejection>,
}

impl<T> Loaded<T> {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }

    fn reject(
        &mut self,
        index: usize,
        key: Option<String>,
        reason: String,
        sink: &mut dyn EventSink,
    ) {
        match &key {
            Some(k) => warn!("Rejecting record #{index} ('{k}'): {reason}."),
            None => warn!("Rejecting record #{index}: {reason}."),
        }
        if sink.wants(AnalysisEventKind::RecordRejected) {
            sink.send(AnalysisEvent::RecordRejected {
                index,
                key: key.clone(),
                reason: reason.clone(),
            });
        }
        self.rejected.push(RecordRejection { index, key, reason });
    }
}

/// Loads doorway definitions, sorted by name.
pub fn load_doorways(json: &str, config: &AnalysisConfig) -> Result<Loaded<Doorway>> {
    doorways_from_value(serde_json::from_str(json)?, config, &mut ())
}

pub fn load_doorways_from_reader<R: Read>(
    reader: R,
    config: &AnalysisConfig,
) -> Result<Loaded<Doorway>> {
    doorways_from_value(serde_json::from_reader(reader)?, config, &mut ())
}

pub fn load_doorways_with_events(
    json: &str,
    config: &AnalysisConfig,
    sink: &mut dyn EventSink,
) -> Result<Loaded<Doorway>> {
    doorways_from_value(serde_json::from_str(json)?, config, sink)
}

/// Loads a smoke dataset, preserving input order.
pub fn load_smokes(json: &str, config: &AnalysisConfig) -> Result<Loaded<Smoke>> {
    smokes_from_value(serde_json::from_str(json)?, config, &mut ())
}

pub fn load_smokes_from_reader<R: Read>(
    reader: R,
    config: &AnalysisConfig,
) -> Result<Loaded<Smoke>> {
    smokes_from_value(serde_json::from_reader(reader)?, config, &mut ())
}

pub fn load_smokes_with_events(
    json: &str,
    config: &AnalysisConfig,
    sink: &mut dyn EventSink,
) -> Result<Loaded<Smoke>> {
    smokes_from_value(serde_json::from_str(json)?, config, sink)
}

fn doorways_from_value(
    value: Value,
    config: &AnalysisConfig,
    sink: &mut dyn EventSink,
) -> Result<Loaded<Doorway>> {
    config.validate()?;
    let Value::Object(entries) = value else {
        return Err(Error::InvalidRecord {
            index: 0,
            reason: "doorway document must be an object keyed by name".into(),
        });
    };

    let mut entries: Vec<(String, Value)> = entries.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut loaded = Loaded::new();
    for (index, (name, entry)) in entries.into_iter().enumerate() {
        let built = serde_json::from_value::<DoorwayRecord>(entry)
            .map_err(Error::from)
            .and_then(|record| record.into_doorway(name.clone(), config));
        match built {
            Ok(doorway) => loaded.records.push(doorway),
            Err(e) => loaded.reject(index, Some(name), e.to_string(), sink),
        }
    }

    info!(
        "Loaded {} doorways ({} rejected).",
        loaded.records.len(),
        loaded.rejected.len()
    );
    Ok(loaded)
}

fn smokes_from_value(
    value: Value,
    config: &AnalysisConfig,
    sink: &mut dyn EventSink,
) -> Result<Loaded<Smoke>> {
    config.validate()?;
    let Value::Array(entries) = value else {
        return Err(Error::InvalidRecord {
            index: 0,
            reason: "smoke dataset must be an array".into(),
        });
    };

    let mut loaded = Loaded::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let built = serde_json::from_value::<SmokeRecord>(entry)
            .map_err(Error::from)
            .and_then(|record| record.into_smoke(config));
        match built {
            Ok(smoke) => loaded.records.push(smoke),
            Err(e) => loaded.reject(index, None, e.to_string(), sink),
        }
    }

    info!(
        "Loaded {} smokes ({} rejected).",
        loaded.records.len(),
        loaded.rejected.len()
    );
    Ok(loaded)
}
