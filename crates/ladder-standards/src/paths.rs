//! Data directory resolution.

use std::path::PathBuf;

/// Environment variable for overriding the embedded data.
pub const DATA_ENV_VAR: &str = "LADDER_DATA_DIR";

/// Get the configured data directory, if any.
///
/// Resolution order:
/// 1. `explicit` (from configuration or a CLI flag)
/// 2. `LADDER_DATA_DIR` environment variable
/// 3. `None`: use the embedded data
pub fn data_dir(explicit: Option<&PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.clone());
    }
    std::env::var_os(DATA_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
