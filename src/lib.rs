//! Catalog Browser: a terminal client for a two-category item catalog.
//!
//! The browser lists the items of a catalog service (products and plugins),
//! ranks them against an incremental search query, and drives a
//! single-flight generation request for the selected item:
//! - Hash-style page navigation (`#products`, `#plugins`, home)
//! - Substring ranking with match highlighting
//! - Session cache with joined concurrent catalog loads
//! - Stale-response guard across page changes
//! - Persisted identity and theme preference
//! - Clipboard copy with OSC 52 fallback

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Binary (main.rs) + runtime                         │  ← tokio event loop
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, action emission                  │
//! │  - Router, ranking, request orchestrator            │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - Preferences │   │ - Fetch tasks │
//! │ - Theming     │   │ - JSON I/O    │   │ - Generation  │
//! │ - Input       │   │               │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Catalog store (catalog/), adapters                 │
//! │  (infrastructure/: HTTP, clipboard, icons, paths),  │
//! │  domain types and errors (domain/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing-subscriber fmt layer, rotating log file  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: state machine with event/action model
//! - [`catalog`]: catalog source seam and session cache
//! - [`domain`]: items, generation inputs, errors
//! - [`infrastructure`]: HTTP backend, clipboard, icon table, paths
//! - [`storage`]: preference persistence
//! - [`worker`]: background execution of network requests
//! - [`ui`]: rendering and command input
//! - [`observability`]: logging setup
//! - [`runtime`]: the event loop tying it all together
//!
//! # Configuration
//!
//! `config.toml` in the platform config directory, or a path given with
//! `--config`:
//!
//! ```toml
//! base_url = "http://localhost:10768"
//! generate_path = "/api/generate"
//! trace_level = "debug"
//! notification_secs = 3
//!
//! [icons]
//! placeholder = "/images/plugin.svg"
//!
//! [icons.mapping]
//! datagrip = "/images/datagrip.svg"
//! ```
//!
//! # Example
//!
//! ```rust
//! use catalog_browser::{handle_event, initialize, Action, Config, Event};
//! use catalog_browser::domain::Identity;
//! use catalog_browser::storage::PreferenceStore;
//!
//! # struct Memory;
//! # impl PreferenceStore for Memory {
//! #     fn identity(&self) -> catalog_browser::Result<Option<Identity>> { Ok(Some(Identity::new("Acme", "Dev"))) }
//! #     fn save_identity(&mut self, _: &Identity) -> catalog_browser::Result<()> { Ok(()) }
//! #     fn clear_identity(&mut self) -> catalog_browser::Result<()> { Ok(()) }
//! #     fn theme(&self) -> catalog_browser::Result<Option<catalog_browser::app::ThemeMode>> { Ok(None) }
//! #     fn save_theme(&mut self, _: catalog_browser::app::ThemeMode) -> catalog_browser::Result<()> { Ok(()) }
//! # }
//! let mut state = initialize(&Config::default(), &Memory);
//! let (redraw, actions) = handle_event(&mut state, &Event::Navigate("#plugins".into()))?;
//! assert!(redraw);
//! assert!(matches!(actions[0], Action::PostToWorker(_)));
//! # Ok::<(), catalog_browser::CatalogError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod runtime;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, ThemeMode};
pub use domain::{CatalogError, Result};
pub use ui::Theme;

use crate::infrastructure::{expand_tilde, get_data_dir, IconConfig, IconTable};
use crate::storage::PreferenceStore;
use crate::ui::ThemeSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default catalog and generation service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:10768";

/// Default generation endpoint, relative to the base URL.
pub const DEFAULT_GENERATE_PATH: &str = "/api/generate";

/// Browser configuration.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the catalog and generation service.
    pub base_url: String,

    /// Path of the generation endpoint below `base_url`.
    pub generate_path: String,

    /// Overrides the platform data directory (preferences, log file).
    /// A leading `~` is expanded.
    pub data_dir: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Log filter: `trace`, `debug`, `info`, `warn`, `error` or any
    /// `EnvFilter` directive. Default: `"info"`
    pub trace_level: Option<String>,

    /// Seconds a notification stays visible.
    pub notification_secs: u64,

    pub icons: IconConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            generate_path: DEFAULT_GENERATE_PATH.to_string(),
            data_dir: None,
            theme_file: None,
            trace_level: None,
            notification_secs: 3,
            icons: IconConfig::default(),
        }
    }
}

impl Config {
    /// Reads `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the file exists but cannot be read
    /// or parsed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use catalog_browser::Config;
    ///
    /// let config = Config::load(std::path::Path::new("/nonexistent/config.toml"))?;
    /// assert_eq!(config, Config::default());
    /// # Ok::<(), catalog_browser::CatalogError>(())
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::parse(&contents)
            .map_err(|e| CatalogError::Config(format!("{}: {e}", path.display())))
    }

    /// Parses TOML configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] on invalid TOML or field types.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CatalogError::Config(e.to_string()))
    }

    /// Validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if `base_url` is not an absolute
    /// http(s) URL.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| CatalogError::Config(format!("invalid base_url {:?}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CatalogError::Config(format!(
                "base_url must be http or https, got {}",
                url.scheme()
            )));
        }
        Ok(url)
    }

    /// Data directory: the configured override or the platform default.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map_or_else(get_data_dir, expand_tilde)
    }

    #[must_use]
    pub const fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }
}

/// Builds the initial application state from configuration and stored
/// preferences.
///
/// Unreadable preferences or a broken theme file are logged and replaced by
/// defaults; startup never fails here.
pub fn initialize(config: &Config, preferences: &dyn PreferenceStore) -> AppState {
    tracing::debug!("initializing catalog browser");

    let identity = preferences.identity().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to read stored identity");
        None
    });
    let theme_mode = preferences.theme().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to read stored theme");
        None
    });

    let custom = config.theme_file.as_deref().and_then(|theme_file| {
        Theme::from_file(expand_tilde(theme_file))
            .map_err(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using built-in");
            })
            .ok()
    });

    let icons = IconTable::new(config.icons.clone(), config.base_url().ok());

    AppState::new(identity.unwrap_or_default(), theme_mode.unwrap_or_default())
        .with_themes(ThemeSet::with_custom(custom))
        .with_icons(icons)
        .with_notification_ttl(config.notification_ttl())
}
