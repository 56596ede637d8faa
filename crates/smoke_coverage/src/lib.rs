#![forbid(unsafe_code)]
//! smoke_coverage: how well thrown smokes block sight through map chokepoints.
//!
//! Modules:
//! - geometry: points, circles, segments and the strict point-in-circle predicate
//! - doorway / smoke: the two entities, built from map configuration and throw records
//! - coverage: circle-segment intersection producing a coverage percentage
//! - assign: smoke-to-doorway matching that drives the coverage computation
//! - stats: per-doorway, overall and grouped descriptive statistics
//! - events: observable run events and sinks
//! - records: JSON input/output schema with per-record validation (feature `serde`)
pub mod assign;
pub mod config;
pub mod coverage;
pub mod doorway;
pub mod error;
pub mod events;
pub mod geometry;
#[cfg(feature = "serde")]
pub mod records;
pub mod smoke;
pub mod stats;

/// Convenient re-exports for common types. Import with `use smoke_coverage::prelude::*;`.
pub mod prelude {
    pub use crate::assign::{assign_smokes, Assigner, Assignment, Selection};
    pub use crate::config::AnalysisConfig;
    pub use crate::coverage::{coverage_percent, solve, Coverage, CoverageCase};
    pub use crate::doorway::{Doorway, DoorwayId};
    pub use crate::error::{Error, Result};
    pub use crate::events::{
        AnalysisEvent, AnalysisEventKind, EventSink, FnSink, MultiSink, VecSink,
    };
    pub use crate::geometry::{point_in_circle, Circle, Segment};
    #[cfg(feature = "serde")]
    pub use crate::records::{
        coverage_records, load_doorways, load_doorways_from_reader, load_smokes,
        load_smokes_from_reader, CoverageRecord, DoorwayRecord, Loaded, RecordRejection,
        SmokeRecord,
    };
    pub use crate::smoke::{Smoke, SmokeMeta};
    pub use crate::stats::{group_by, CoverageStats, DoorwayStats, StatsReport};
}
