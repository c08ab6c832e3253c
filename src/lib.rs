//! zatlas: a Zellij plugin for browsing world-country data.
//!
//! zatlas fetches the country dataset once from a public REST endpoint and
//! provides:
//! - Debounced case-insensitive search over official names
//! - Region filtering cycled from the regions present in the data
//! - Locale-aware ordering and fixed-size pagination
//! - Favourites with free-text notes, persisted as one JSON object

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, search debounce                  │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog       │   │ Storage Layer │
//! │ (ui/)         │   │ (catalog/)    │   │ (storage/)    │
//! │ - Rendering   │   │ - Filter/sort │   │ - Favourites  │
//! │ - Theming     │   │ - Pagination  │   │ - JSON I/O    │
//! │ - Components  │   │ - Regions     │   │ - Backend API │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Source, Infrastructure & Domain Layers             │
//! │  - Fetch lifecycle and decoding (source/)           │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Country record and errors (domain/)              │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a local OTLP file       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zatlas.wasm" {
//!         endpoint "https://restcountries.com/v3.1/all?fields=name,region"
//!         debounce_ms "300"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use zatlas::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert!(matches!(actions[1], Action::FetchCountries { generation: 1, .. }));
//! # Ok::<(), zatlas::AtlasError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod source;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{AtlasError, CountryRecord, FetchError, Result};
pub use ui::Theme;

use source::DEFAULT_ENDPOINT;
use std::collections::BTreeMap;
use std::time::Duration;
use storage::{FavoritesStore, MemoryStore};

/// Default search quiet period in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL the dataset is fetched from.
    pub endpoint: String,

    /// How long search input must stay unchanged before it is applied.
    pub debounce_ms: u64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` maps to the sandbox `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing, e.g. `"debug"` or `"zatlas=trace"`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing, blank or unparsable values fall back to the defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zatlas::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "150".to_string());
    /// map.insert("theme".to_string(), "catppuccin-latte".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.debounce_ms, 150);
    /// assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let debounce_ms = value("debounce_ms").map_or(defaults.debounce_ms, |raw| {
            raw.parse::<u64>().unwrap_or_else(|_| {
                tracing::debug!(debounce_ms = %raw, "invalid debounce_ms, using default");
                defaults.debounce_ms
            })
        });

        Self {
            endpoint: value("endpoint").unwrap_or(defaults.endpoint),
            debounce_ms,
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level").unwrap_or(defaults.trace_level),
        }
    }

    /// Loads the configured theme: file first, then name, then the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates the initial `AppState`.
///
/// Favourites start on an in-memory backend; the plugin swaps in the JSON file
/// store once the host grants filesystem access (see [`Action::OpenStorage`]).
/// Nothing is fetched until permissions are granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(endpoint = %config.endpoint, debounce_ms = config.debounce_ms, "initializing zatlas plugin");

    AppState::new(
        FavoritesStore::load(Box::new(MemoryStore::new())),
        config.load_theme(),
        config.endpoint.clone(),
        Duration::from_millis(config.debounce_ms),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn blank_and_invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("endpoint", "   "),
            ("debounce_ms", "soon"),
            ("trace_level", ""),
        ]));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert_eq!(config.trace_level, "info");
    }

    #[test]
    fn values_are_trimmed() {
        let config = Config::from_zellij(&map(&[
            ("endpoint", " http://localhost:8080/all "),
            ("debounce_ms", "0"),
            ("trace_level", "zatlas=debug"),
        ]));
        assert_eq!(config.endpoint, "http://localhost:8080/all");
        assert_eq!(config.debounce_ms, 0);
        assert_eq!(config.trace_level, "zatlas=debug");
    }

    #[test]
    fn theme_file_wins_over_name() {
        let mut file = NamedTempFile::new().unwrap();
        let latte = include_str!("../themes/catppuccin-latte.toml").replace("catppuccin-latte", "mine");
        file.write_all(latte.as_bytes()).unwrap();

        let config = Config {
            theme_name: Some("catppuccin-frappe".to_string()),
            theme_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "mine");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, ui::theme::DEFAULT_THEME);
    }

    #[test]
    fn initialize_applies_endpoint_and_quiet_period() {
        let config = Config {
            endpoint: "http://example.test/all".to_string(),
            debounce_ms: 120,
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.endpoint, "http://example.test/all");
        assert_eq!(state.debouncer.quiet_period(), Duration::from_millis(120));
        assert!(state.favorites.is_empty());
        assert!(!state.source.has_started());
    }
}
