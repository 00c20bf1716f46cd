//! Error types for snapshot and history loading.

use thiserror::Error;

/// Errors that can occur while loading catalog snapshots or user history
/// files. The core algorithms never produce these; malformed references
/// inside otherwise valid data are dropped, not raised.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error while reading a snapshot or history file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File content was not valid JSON for the expected shape
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A field had a value outside its documented range
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience alias for Results in this crate.
pub type Result<T> = std::result::Result<T, CatalogError>;
