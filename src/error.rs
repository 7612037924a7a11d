use std::path::PathBuf;

use thiserror::Error;

/// A project date field that is not a valid calendar date.
///
/// Recovered locally: the offending project is left out of the timeline,
/// everything else still renders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{value}' (expected YYYY-MM-DD)")]
pub struct DateParseError {
    pub value: String,
}

impl DateParseError {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Why a single CSV row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowErrorKind {
    #[error("is incomplete. Project Name, Epic Number, Team, Start Date, and End Date are required")]
    Incomplete,
    #[error("has an invalid date '{0}'. Please use a valid date format (e.g., YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("has an invalid progress '{0}' (expected a whole number from 0 to 100)")]
    InvalidProgress(String),
    #[error("has an invalid RAG status '{0}' (expected Red, Amber or Green)")]
    InvalidRagStatus(String),
}

/// A CSV row that aborted an import. `row` is 1-indexed and counts the header line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Row {row} {kind}")]
pub struct ImportRowError {
    pub row: usize,
    pub kind: RowErrorKind,
}

/// Failure of a whole CSV import. Imports are all-or-nothing.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV file is empty or contains only a header.")]
    Empty,
    #[error(transparent)]
    Row(#[from] ImportRowError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),
}

/// The external sequencing call failed or answered with something unusable.
///
/// Always retryable from the user's point of view; the board is left unchanged.
#[derive(Debug, Error)]
pub enum SequencingError {
    #[error("no projects to optimize; add some projects or adjust filters")]
    NoCandidates,
    #[error("sequencing service failed: {0}")]
    Service(String),
    #[error("sequencing service returned an unparsable response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("timeline width must be positive, got {0}")]
    InvalidWidth(f64),
}
