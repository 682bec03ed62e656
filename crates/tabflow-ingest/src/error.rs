//! Error types for definition and table loading.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// File missing or unreadable.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Definition text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON, but not an array of objects.
    #[error("invalid pipeline definition: {reason}")]
    InvalidDefinition { reason: String },

    /// Polars could not parse the CSV input.
    #[error("failed to parse CSV {origin}: {message}")]
    CsvParse { origin: String, message: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;
