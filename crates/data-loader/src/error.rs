//! Error types for the data-loader crate.
//!
//! Only file-level failures abort a load. Every row-level variant is
//! reported by the parser and swallowed by the catalog builder, which skips
//! the offending row and keeps going.

use thiserror::Error;

/// Errors that can occur during catalog loading and row parsing
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// The dataset path does not exist
    #[error("Movie dataset not found: {path}")]
    FileNotFound { path: String },

    /// Reading the dataset failed part way
    #[error("Failed to read movie dataset: {0}")]
    IoError(#[from] std::io::Error),

    /// Expected number of fields in a line doesn't match actual
    #[error("Expected at least {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// Row parsed but failed a catalog rule (e.g. placeholder title)
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
