//! Error types for team import.

use thiserror::Error;

/// Errors that can occur while reading a submitted team.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    /// The JSON payload did not match the team shape.
    #[error("Invalid team JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    /// A line of export text could not be understood.
    #[error("Line {line}: {message}")]
    Export { line: usize, message: String },
}

/// Result type for team import.
pub type Result<T> = std::result::Result<T, ImportError>;
