//! Error types for data loading operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading dex data or format definitions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Data directory not found.
    #[error("Data directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read a data file.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read or parse a CSV table.
    #[error("Failed to read CSV {file}: {source}")]
    CsvRead {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// Failed to parse the format table.
    #[error("Failed to parse format table {file}: {source}")]
    Toml {
        file: String,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid value in a data field.
    #[error("Invalid {field} value '{value}' in {file}")]
    InvalidValue {
        field: &'static str,
        value: String,
        file: String,
    },

    /// Two rows normalize to the same identifier.
    #[error("Duplicate entry '{id}' in {file}")]
    DuplicateEntry { id: String, file: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for data loading operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
