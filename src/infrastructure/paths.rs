//! Locations of the configuration file and the data directory.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CATALOG_SYNC_DATA_DIR";

/// Environment variable naming an optional TOML configuration file.
pub const CONFIG_FILE_ENV: &str = "CATALOG_SYNC_CONFIG";

/// File name of the OTLP trace output inside the data directory.
pub const TRACE_FILE_NAME: &str = "catalog-sync-otlp.json";

/// Returns the data directory used when the configuration does not name one.
///
/// `$CATALOG_SYNC_DATA_DIR` when set and non-empty, otherwise
/// `<system temp dir>/catalog-sync`.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    data_dir_from(std::env::var(DATA_DIR_ENV).ok())
}

fn data_dir_from(env_value: Option<String>) -> PathBuf {
    env_value
        .filter(|v| !v.trim().is_empty())
        .map_or_else(|| std::env::temp_dir().join("catalog-sync"), PathBuf::from)
}

/// Path of the trace file inside `data_dir`.
#[must_use]
pub fn trace_file(data_dir: &Path) -> PathBuf {
    data_dir.join(TRACE_FILE_NAME)
}

/// Path of the configuration file, if `$CATALOG_SYNC_CONFIG` names one.
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    std::env::var(CONFIG_FILE_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
