//! Catalog Sync: client-side synchronization for a paginated article catalog.
//!
//! The crate keeps a local, incrementally loaded copy of a remote article
//! catalog consistent with the server while the user searches, pages and
//! selects:
//! - Cursor-based pagination with append-on-load-more
//! - Search that resets the list and the cursor
//! - Suppression of responses that belong to a superseded query
//! - A selection that follows the list and can be refreshed from the server
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal runtime (main.rs)                         │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, actions                          │
//! │  - Catalog synchronizer, selection reconciler       │
//! │  - Request epochs                                   │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Worker Layer  │
//! │ (ui/)         │   │ (api/)        │   │ (worker/)     │
//! │ - View models │   │ - HTTP client │   │ - Dispatcher  │
//! │ - Rendering   │   │ - Wire models │   │ - Messages    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Paths (infrastructure/)                          │
//! │  - Article, Page, Cursor, errors (domain/)          │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Values are layered: defaults, then an optional TOML file named by
//! `$CATALOG_SYNC_CONFIG`, then environment variables.
//!
//! ```toml
//! api_base_url = "https://catalog.example.com"
//! include_drafts = true
//! request_timeout_secs = 10
//! trace_level = "debug"
//! data_dir = "/var/lib/catalog-sync"
//! ```
//!
//! | Key                    | Environment variable           |
//! |------------------------|--------------------------------|
//! | `api_base_url`         | `CATALOG_API_BASE_URL`         |
//! | `include_drafts`       | `CATALOG_INCLUDE_DRAFTS`       |
//! | `request_timeout_secs` | `CATALOG_REQUEST_TIMEOUT_SECS` |
//! | `trace_level`          | `CATALOG_TRACE_LEVEL`          |
//! | `data_dir`             | `CATALOG_SYNC_DATA_DIR`        |
//!
//! # Example
//!
//! ```rust
//! use catalog_sync::{handle_event, initialize, Action, Config, Event};
//!
//! let (mut state, actions) = initialize(&Config::default());
//! assert_eq!(actions.len(), 1);
//! assert!(state.catalog().is_loading());
//!
//! let (render, actions) = handle_event(&mut state, &Event::SearchSubmitted("rust".into()))?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::PostToWorker(_)));
//! # Ok::<(), catalog_sync::CatalogError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{Article, CatalogError, Cursor, Page, Result, Timestamp};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::worker::WorkerMessage;

/// Base URL used when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variables and the configuration keys they override.
const ENV_KEYS: [(&str, &str); 5] = [
    ("CATALOG_API_BASE_URL", "api_base_url"),
    ("CATALOG_INCLUDE_DRAFTS", "include_drafts"),
    ("CATALOG_REQUEST_TIMEOUT_SECS", "request_timeout_secs"),
    ("CATALOG_TRACE_LEVEL", "trace_level"),
    (infrastructure::paths::DATA_DIR_ENV, "data_dir"),
];

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Origin of the catalog API, without trailing slash.
    ///
    /// Requests go to `{api_base_url}/api/v1/articles`. Default:
    /// `"http://localhost:8080"`
    pub api_base_url: String,

    /// Ask the server to include unpublished articles in list pages.
    pub include_drafts: bool,

    /// Per-request timeout. Default: 30
    pub request_timeout_secs: u64,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Where trace output is written. Falls back to
    /// [`infrastructure::default_data_dir`].
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            include_drafts: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            trace_level: None,
            data_dir: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_base_url: Option<String>,
    include_drafts: Option<bool>,
    request_timeout_secs: Option<u64>,
    trace_level: Option<String>,
    data_dir: Option<PathBuf>,
}

impl Config {
    /// Parses configuration from a string map with fallback defaults.
    ///
    /// Unparseable values are ignored rather than rejected.
    ///
    /// # Parsing Rules
    ///
    /// - `api_base_url`: trimmed, trailing `/` removed, empty → default
    /// - `include_drafts`: `true/1/yes/on` or `false/0/no/off`
    /// - `request_timeout_secs`: positive integer
    /// - `trace_level`, `data_dir`: taken as-is when non-empty
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use catalog_sync::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_base_url".to_string(), " https://api.example.com/ ".to_string());
    /// map.insert("include_drafts".to_string(), "yes".to_string());
    /// map.insert("request_timeout_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.api_base_url, "https://api.example.com");
    /// assert!(config.include_drafts);
    /// assert_eq!(config.request_timeout_secs, 30);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut config = Self::default();
        config.apply_map(map);
        config
    }

    /// Parses a TOML configuration document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] for malformed TOML, wrongly typed values,
    /// or unknown keys.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(input).map_err(|e| CatalogError::Config(e.to_string()))?;

        let mut config = Self::default();
        if let Some(url) = file.api_base_url {
            config.api_base_url = normalize_base_url(&url);
        }
        if let Some(include_drafts) = file.include_drafts {
            config.include_drafts = include_drafts;
        }
        if let Some(secs) = file.request_timeout_secs {
            if secs == 0 {
                return Err(CatalogError::Config(
                    "request_timeout_secs must be positive".to_string(),
                ));
            }
            config.request_timeout_secs = secs;
        }
        config.trace_level = file.trace_level.filter(|l| !l.trim().is_empty());
        config.data_dir = file.data_dir;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] naming `path` if the file cannot be read,
    /// or the error of [`Config::from_toml_str`].
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "reading configuration file");
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Loads the layered configuration: defaults, the file named by
    /// `$CATALOG_SYNC_CONFIG` if any, then environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the named file cannot be read or does
    /// not parse.
    pub fn load() -> Result<Self> {
        let mut config = match infrastructure::config_file_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        let env: BTreeMap<String, String> = ENV_KEYS
            .iter()
            .filter_map(|(var, key)| std::env::var(var).ok().map(|v| ((*key).to_string(), v)))
            .collect();
        config.apply_map(&env);
        Ok(config)
    }

    /// Effective data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(infrastructure::default_data_dir)
    }

    fn apply_map(&mut self, map: &BTreeMap<String, String>) {
        if let Some(url) = map.get("api_base_url") {
            self.api_base_url = normalize_base_url(url);
        }
        if let Some(flag) = map.get("include_drafts").and_then(|s| parse_flag(s)) {
            self.include_drafts = flag;
        }
        if let Some(secs) = map
            .get("request_timeout_secs")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
        {
            self.request_timeout_secs = secs;
        }
        if let Some(level) = map.get("trace_level").filter(|l| !l.trim().is_empty()) {
            self.trace_level = Some(level.trim().to_string());
        }
        if let Some(dir) = map.get("data_dir").filter(|d| !d.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir.trim()));
        }
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Creates the application state and the actions that start the first load.
///
/// The returned actions hold exactly one request: the first page of the
/// unfiltered catalog, as if the search had just been cleared.
///
/// # Example
///
/// ```rust
/// use catalog_sync::{initialize, Action, Config};
/// use catalog_sync::worker::WorkerMessage;
///
/// let (state, actions) = initialize(&Config::default());
/// assert!(state.catalog().query().is_none());
/// match &actions[..] {
///     [Action::PostToWorker(WorkerMessage::FetchPage { params, .. })] => {
///         assert!(params.cursor.is_none());
///     }
///     other => panic!("unexpected actions: {other:?}"),
/// }
/// ```
#[must_use]
pub fn initialize(config: &Config) -> (AppState, Vec<Action>) {
    tracing::debug!(api_base_url = %config.api_base_url, "initializing catalog sync");

    let mut state = AppState::new(config);
    let request = state.set_query(None);
    let action = Action::PostToWorker(WorkerMessage::fetch_page(request.ticket, request.params));
    (state, vec![action])
}
