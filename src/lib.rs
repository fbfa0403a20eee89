//! zlaunchpad: an application launcher for Zellij.
//!
//! The plugin opens as a floating pane with a search line. Typing filters the
//! installed applications by name and description; arrow keys or the mouse
//! pick a result and Enter launches it. The pane grows and shrinks with the
//! number of results.

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
//! │  Application Layer (app/)                           │  ← Session
//! │  - Query, selection, viewport, resize, launch       │
//! │  - Event handling and actions                       │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Search        │   │ Worker Layer  │
//! │ (ui/)         │   │ (search/)     │   │ (worker/)     │
//! │ - Rendering   │   │ - Filtering   │   │ - Index load  │
//! │ - Theming     │   │ - Matching    │   │ - Async search│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Discovery, Infrastructure & Domain                 │
//! │  - Desktop entries and icons (discovery/)           │
//! │  - Host paths, launch commands (infrastructure/)    │
//! │  - AppEntry, errors (domain/)                       │
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
//! ```kdl
//! plugin location="file:/path/to/zlaunchpad.wasm" {
//!     app_dirs "/usr/share/applications,~/.local/share/applications"
//!     search_mode "worker"
//!     max_height "20"
//!     theme "catppuccin-latte"
//!     trace_level "debug"
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use zlaunchpad::domain::AppEntry;
//! use zlaunchpad::worker::WorkerResponse;
//! use zlaunchpad::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! handle_event(&mut state, &Event::WorkerResponse(WorkerResponse::ApplicationsLoaded {
//!     apps: vec![AppEntry::new("Firefox", "/usr/share/applications/firefox.desktop")],
//! }))?;
//!
//! handle_event(&mut state, &Event::Char('f'))?;
//! let (_, actions) = handle_event(&mut state, &Event::Enter)?;
//! assert!(matches!(actions[0], Action::Launch { .. }));
//! # Ok::<(), zlaunchpad::LaunchpadError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - Host calls are compiled only for `wasm32`; the library and its tests run
//!   natively.

pub mod app;
pub mod discovery;
pub mod domain;
pub mod infrastructure;
pub mod search;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, SearchMode};
pub use domain::{AppEntry, LaunchpadError, Result};
pub use ui::Theme;

use app::ResizeGeometry;
use std::collections::BTreeMap;

const DEFAULT_APP_DIRS: &[&str] = &["/usr/share/applications", "~/.local/share/applications"];

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Applications directories scanned for `.desktop` files. `~` is the
    /// user's home directory.
    pub app_dirs: Vec<String>,

    /// Where searches run. Default: [`SearchMode::Local`]
    pub search_mode: SearchMode,

    /// Rows per result. Values above 1 show the description on its own line.
    pub item_height: u32,

    /// Rows rendered beyond each edge of the viewport.
    pub overscan: u32,

    /// Pane height with no results.
    pub search_bar_height: u32,

    /// Extra rows added below a non-empty result list.
    pub base_padding: u32,

    /// Upper bound for the result area height.
    pub max_height: u32,

    /// Deadline for searches and launches, in seconds.
    pub request_timeout_secs: f64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let geometry = ResizeGeometry::default();
        Self {
            app_dirs: DEFAULT_APP_DIRS.iter().map(ToString::to_string).collect(),
            search_mode: SearchMode::default(),
            item_height: geometry.item_height,
            overscan: 3,
            search_bar_height: geometry.search_bar_height,
            base_padding: geometry.base_padding,
            max_height: geometry.max_height,
            request_timeout_secs: 5.0,
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored; malformed values fall back to their defaults
    /// with a debug event.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use zlaunchpad::{Config, SearchMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("app_dirs".to_string(), "~/apps, /opt/apps".to_string());
    /// map.insert("search_mode".to_string(), "worker".to_string());
    /// map.insert("max_height".to_string(), "twelve".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.app_dirs, vec!["~/apps", "/opt/apps"]);
    /// assert_eq!(config.search_mode, SearchMode::Worker);
    /// assert_eq!(config.max_height, 20);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let app_dirs = config
            .get("app_dirs")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|v: &Vec<String>| !v.is_empty())
            .unwrap_or(defaults.app_dirs);

        let request_timeout_secs = parse_or(config, "request_timeout_secs", defaults.request_timeout_secs);
        let request_timeout_secs = if request_timeout_secs.is_finite() && request_timeout_secs > 0.0 {
            request_timeout_secs
        } else {
            defaults.request_timeout_secs
        };

        Self {
            app_dirs,
            search_mode: parse_or(config, "search_mode", defaults.search_mode),
            item_height: parse_or(config, "item_height", defaults.item_height).max(1),
            overscan: parse_or(config, "overscan", defaults.overscan),
            search_bar_height: parse_or(config, "search_bar_height", defaults.search_bar_height),
            base_padding: parse_or(config, "base_padding", defaults.base_padding),
            max_height: parse_or(config, "max_height", defaults.max_height),
            request_timeout_secs,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned().unwrap_or(defaults.trace_level),
        }
    }

    /// Geometry for the host pane height negotiation.
    #[must_use]
    pub const fn resize_geometry(&self) -> ResizeGeometry {
        ResizeGeometry {
            search_bar_height: self.search_bar_height,
            item_height: self.item_height,
            base_padding: self.base_padding,
            max_height: self.max_height,
        }
    }
}

fn parse_or<T>(config: &BTreeMap<String, String>, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = config.get(key) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        tracing::debug!(key, value = %raw, error = %e, "invalid configuration value, using default");
        default
    })
}

/// Creates the session state for `config`.
///
/// Loads the theme (file, then name, then the default) and returns an
/// `AppState` in the `Loading` phase. The application index is requested by
/// the runtime with `Event::Start` once permissions are granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(search_mode = ?config.search_mode, "initializing zlaunchpad plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|e| {
                    tracing::debug!(theme_name = %theme_name, error = %e, "failed to load theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(config, theme)
}
