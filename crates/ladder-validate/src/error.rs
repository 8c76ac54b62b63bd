//! Configuration errors for format registration and resolution.
//!
//! Legality violations are not errors; see [`crate::Problem`].

use ladder_standards::StandardsError;
use thiserror::Error;

/// Errors that abort building a format registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// Two definitions normalize to the same id.
    #[error("Duplicate format id '{id}' ('{first}' and '{second}')")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },

    /// A definition name has no alphanumeric characters.
    #[error("Format name '{name}' normalizes to an empty id")]
    EmptyName { name: String },

    /// A definition shadows a library rule.
    #[error("Format '{name}' collides with the library rule of the same id")]
    RuleCollision { name: String },

    /// Loading the underlying data failed.
    #[error(transparent)]
    Standards(#[from] StandardsError),
}

/// A defect in the ruleset graph of one format.
///
/// Each defect rejects the affected format (and every format that references
/// it) without failing the rest of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesetError {
    /// No format with this id is registered.
    #[error("Unknown format '{id}'")]
    UnknownFormat { id: String },

    /// An entry names nothing the registry, rule library, or dex knows.
    #[error("{format}: '{entry}' is not a format, rule, or known entity")]
    UnknownReference { format: String, entry: String },

    /// A compound ban does not have exactly two non-empty halves.
    #[error("{format}: malformed compound ban '{entry}'")]
    MalformedComplexBan { format: String, entry: String },

    /// Resolution revisited an id already on the active path.
    #[error("Ruleset cycle: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },
}

impl RulesetError {
    /// Short label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnknownFormat { .. } => "unknown format",
            Self::UnknownReference { .. } => "unknown reference",
            Self::MalformedComplexBan { .. } => "malformed compound ban",
            Self::Cycle { .. } => "cycle",
        }
    }
}

/// Result type for registry construction.
pub type Result<T> = std::result::Result<T, RegistryError>;
