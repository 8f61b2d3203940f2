//! Error types for data operations
//!
//! Provides unified error handling for loading, parsing and lookup.
//! Malformed rows are not errors; see [`SkippedRow`](super::SkippedRow).

use thiserror::Error;

// Re-export CSV limits from constants module for consistency
pub use crate::constants::{MAX_CSV_ROWS, MAX_CSV_SIZE_MB};

/// Errors that can occur during data operations
#[derive(Error, Debug)]
pub enum DataError {
    /// A named source could not be retrieved; aborts the whole load
    #[error("Failed to fetch source '{label}' from {address}: {reason}")]
    SourceFetch {
        label: String,
        address: String,
        reason: String,
    },

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error from reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Source is too large to load
    #[error("Source too large: {size_mb}MB (max {max_mb}MB)")]
    TooLarge { size_mb: u64, max_mb: usize },

    /// Source has too many lines
    #[error("Too many rows: {rows} (max {max_rows})")]
    TooManyRows { rows: usize, max_rows: usize },

    /// No record with the given number
    #[error("No chip with number '{0}'")]
    NotFound(String),

    /// A load was requested while another is running
    #[error("A catalog load is already in progress")]
    LoadInFlight,

    /// Invalid settings
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

impl DataError {
    /// Wrap any failure as a fetch failure for the named source
    pub fn source_fetch(
        label: impl Into<String>,
        address: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        DataError::SourceFetch {
            label: label.into(),
            address: address.into(),
            reason: reason.to_string(),
        }
    }
}
