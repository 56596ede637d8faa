//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, degenerate doorway geometry, non-finite input coordinates,
//! out-of-order smoke state transitions, rejected input records, JSON and IO failures.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("doorway '{doorway}' has coincident endpoints")]
    DegenerateGeometry { doorway: String },

    #[error("non-finite coordinate in {context}")]
    NonFiniteCoordinate { context: String },

    #[error("{smoke} is already assigned to a doorway")]
    AlreadyAssigned { smoke: String },

    #[error("coverage for {smoke} recorded before assignment")]
    CoverageBeforeAssignment { smoke: String },

    #[error("coverage for {smoke} was already recorded")]
    CoverageAlreadyRecorded { smoke: String },

    #[error("invalid record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[cfg(feature = "serde")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn degenerate_geometry_names_the_doorway() {
        let err = Error::DegenerateGeometry {
            doorway: "window".into(),
        };
        assert_eq!(err.to_string(), "doorway 'window' has coincident endpoints");
    }

    #[test]
    fn invalid_record_reports_index() {
        let err = Error::InvalidRecord {
            index: 3,
            reason: "missing field `grenadeX`".into(),
        };
        assert!(err.to_string().starts_with("invalid record #3"));
    }
}
