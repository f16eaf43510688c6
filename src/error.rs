//! Error types for catalog ingestion.
//!
//! Only catalog loading can fail. Lookups that miss return `None`, and a
//! pattern search that finds nothing reports it through
//! [`MatchStatus`](crate::MatchStatus) rather than an error.

use thiserror::Error;

/// Malformed or inconsistent catalog input. Fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// None of the accepted header names for a required column were present.
    #[error("missing required column `{column}`")]
    MissingColumn { column: &'static str },

    /// A field could not be parsed. `line` is the 1-based data line
    /// (the header is not counted).
    #[error("line {line}: invalid value {value:?} for `{field}`")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("star {0} appears more than once")]
    DuplicateStar(u64),

    #[error("guide pair references unknown star {0}")]
    UnknownStar(u64),

    #[error("guide pair joins star {0} with itself")]
    SelfPair(u64),

    #[error("guide pair ({0}, {1}) appears more than once")]
    DuplicatePair(u64, u64),

    #[error("guide pair ({star_a}, {star_b}) has invalid distance {distance_deg}")]
    InvalidDistance {
        star_a: u64,
        star_b: u64,
        distance_deg: f64,
    },

    #[error("catalog snapshot is corrupt: {0}")]
    Snapshot(String),
}
