//! Bundled loading of dex data and format definitions.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::dex::Dex;
use crate::embedded;
use crate::error::{Result, StandardsError};
use crate::formats::FormatTable;
use crate::hash::short;
use crate::paths;

/// Configuration for loading data.
#[derive(Debug, Clone, Default)]
pub struct StandardsConfig {
    /// Directory holding replacement data files. `None` falls back to
    /// `LADDER_DATA_DIR`, then to the embedded data.
    pub data_dir: Option<PathBuf>,
}

impl StandardsConfig {
    /// Load from a specific directory.
    pub fn from_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(path.into()),
        }
    }
}

/// Dex and format table loaded together.
#[derive(Debug, Clone)]
pub struct Standards {
    pub dex: Dex,
    pub formats: FormatTable,
    /// Where the data came from, for diagnostics.
    pub source: String,
}

impl Standards {
    /// Load data according to `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory is missing, a file cannot be
    /// read, or a table fails to parse.
    pub fn load(config: &StandardsConfig) -> Result<Self> {
        let standards = match paths::data_dir(config.data_dir.as_ref()) {
            Some(dir) => Self::load_dir(&dir)?,
            None => Self::embedded()?,
        };
        info!(
            source = %standards.source,
            species = standards.dex.species_count(),
            formats = standards.formats.len(),
            version = %short(&standards.formats.fingerprint),
            "Loaded standards"
        );
        Ok(standards)
    }

    /// Load the compiled-in data.
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            dex: Dex::embedded()?,
            formats: FormatTable::embedded()?,
            source: "embedded".to_string(),
        })
    }

    /// Load every data file from `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(StandardsError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }
        let read = |file: &str| {
            let path = dir.join(file);
            std::fs::read_to_string(&path).map_err(|e| StandardsError::io(&path, e))
        };
        let [species, moves, items, abilities, formats] =
            embedded::FILE_NAMES.map(read);
        Ok(Self {
            dex: Dex::from_csv(&species?, &moves?, &items?, &abilities?)?,
            formats: FormatTable::from_toml(&formats?, "formats.toml")?,
            source: dir.display().to_string(),
        })
    }
}
