//! Raw format definitions.
//!
//! The format table is a TOML document of `[[format]]` entries. Entries are
//! kept as written; classifying each ruleset/banlist string happens once
//! when the validator registers the table.

use serde::{Deserialize, Serialize};

use crate::embedded;
use crate::error::{Result, StandardsError};
use crate::hash::sha256_hex;

/// Default active generation.
pub const DEFAULT_GEN: u8 = 9;
/// Default maximum team size.
pub const DEFAULT_TEAM_SIZE: usize = 6;
/// Default maximum level.
pub const DEFAULT_MAX_LEVEL: u32 = 100;

/// What a definition is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// Selectable match configuration.
    #[default]
    Format,
    /// Building block composed into other formats.
    Ruleset,
    /// Named list of bans.
    Banlist,
}

impl FormatKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Format => "Format",
            Self::Ruleset => "Ruleset",
            Self::Banlist => "Banlist",
        }
    }

    pub fn is_selectable(&self) -> bool {
        matches!(self, Self::Format)
    }
}

/// One `[[format]]` entry as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatDefinition {
    pub name: String,
    #[serde(default)]
    pub kind: FormatKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_gen", rename = "gen")]
    pub generation: u8,
    #[serde(default)]
    pub ruleset: Vec<String>,
    #[serde(default)]
    pub banlist: Vec<String>,
    #[serde(default = "default_team_size")]
    pub team_size: usize,
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    #[serde(default)]
    pub forced_level: Option<u32>,
}

impl FormatDefinition {
    /// A selectable format with default metadata and no rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FormatKind::Format,
            description: None,
            generation: DEFAULT_GEN,
            ruleset: Vec::new(),
            banlist: Vec::new(),
            team_size: DEFAULT_TEAM_SIZE,
            max_level: DEFAULT_MAX_LEVEL,
            forced_level: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: FormatKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_gen(mut self, generation: u8) -> Self {
        self.generation = generation;
        self
    }

    #[must_use]
    pub fn with_ruleset<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ruleset = entries.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_banlist<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.banlist = entries.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_team_size(mut self, team_size: usize) -> Self {
        self.team_size = team_size;
        self
    }
}

fn default_gen() -> u8 {
    DEFAULT_GEN
}

fn default_team_size() -> usize {
    DEFAULT_TEAM_SIZE
}

fn default_max_level() -> u32 {
    DEFAULT_MAX_LEVEL
}

#[derive(Debug, Deserialize)]
struct FormatFile {
    #[serde(default)]
    format: Vec<FormatDefinition>,
}

/// A loaded format table with its version fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTable {
    pub definitions: Vec<FormatDefinition>,
    /// SHA-256 (hex) of the source text.
    pub fingerprint: String,
}

impl FormatTable {
    /// Parse a TOML format table.
    pub fn from_toml(content: &str, file: &str) -> Result<Self> {
        let parsed: FormatFile = toml::from_str(content).map_err(|source| StandardsError::Toml {
            file: file.to_string(),
            source,
        })?;

        for definition in &parsed.format {
            if definition.team_size == 0 {
                return Err(StandardsError::InvalidValue {
                    field: "team_size",
                    value: definition.team_size.to_string(),
                    file: file.to_string(),
                });
            }
            if let Some(level) = definition.forced_level
                && (level == 0 || level > definition.max_level)
            {
                return Err(StandardsError::InvalidValue {
                    field: "forced_level",
                    value: level.to_string(),
                    file: file.to_string(),
                });
            }
        }

        Ok(Self {
            definitions: parsed.format,
            fingerprint: sha256_hex(content.as_bytes()),
        })
    }

    /// Build a table from in-memory definitions (fingerprint of their debug form).
    pub fn from_definitions(definitions: Vec<FormatDefinition>) -> Self {
        let fingerprint = sha256_hex(format!("{definitions:?}").as_bytes());
        Self {
            definitions,
            fingerprint,
        }
    }

    /// Load the embedded format table.
    pub fn embedded() -> Result<Self> {
        Self::from_toml(embedded::FORMATS, "formats.toml")
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
