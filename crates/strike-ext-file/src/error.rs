//! Error types for file ingestion.

use std::path::PathBuf;

use strike_risk::RiskError;
use thiserror::Error;

/// A specialized Result type for file ingestion.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while loading price history files.
#[derive(Error, Debug)]
pub enum FileError {
    /// The file could not be opened or read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV layer rejected the input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing column: {column}")]
    MissingColumn {
        /// Name of the column that was expected.
        column: String,
    },

    /// A date cell could not be parsed.
    #[error("Invalid date '{value}' on line {line}")]
    InvalidDate {
        /// 1-based line number in the file, header included.
        line: u64,
        /// The offending text.
        value: String,
    },

    /// The parsed rows do not form a valid price series.
    #[error(transparent)]
    Series(#[from] RiskError),
}

impl FileError {
    /// Creates a missing column error.
    #[must_use]
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }
}
