//! Configuration for the Scrollgrid engine.
//!
//! Configuration is loaded from TOML files in the following locations
//! (in order):
//! 1. the platform config directory, e.g. `~/.config/scrollgrid/config.toml`
//! 2. `./config.toml` (current directory, for development)

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use scrollgrid_core_model::{LayoutContext, OpenPosition, PlacementPolicy, WindowId};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Main configuration structure for Scrollgrid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout configuration.
    pub layout: LayoutConfig,
    /// Behavior configuration.
    pub behavior: BehaviorConfig,
}

/// Layout-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Placement policy along the horizontal axis (columns).
    #[serde(default)]
    pub main_axis: PlacementPolicy,

    /// Placement policy along the vertical axis (cells in a column).
    #[serde(default)]
    pub cross_axis: PlacementPolicy,

    /// Where newly opened windows land relative to the focused column.
    #[serde(default)]
    pub open_position: OpenPosition,

    /// Pixels of a truncated neighbor kept visible under lazy-follow
    /// placement.
    #[serde(default = "default_peek_margin")]
    pub peek_margin: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            main_axis: PlacementPolicy::default(),
            cross_axis: PlacementPolicy::default(),
            open_position: OpenPosition::default(),
            peek_margin: default_peek_margin(),
        }
    }
}

impl LayoutConfig {
    /// Bundle this configuration with an MRU snapshot into the context a
    /// single model operation runs under.
    pub fn context<'a>(&self, mru: &'a [WindowId]) -> LayoutContext<'a> {
        LayoutContext {
            main_axis: self.main_axis,
            cross_axis: self.cross_axis,
            open_position: self.open_position,
            peek_margin: self.peek_margin,
            mru,
        }
    }
}

/// Behavior-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Whether to ask the host to focus newly opened windows.
    #[serde(default = "default_true")]
    pub focus_new_windows: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            focus_new_windows: true,
            log_level: default_log_level(),
        }
    }
}

// Default value functions for serde
fn default_peek_margin() -> i32 {
    40
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from standard locations.
    ///
    /// Returns default config if no file is found.
    pub fn load() -> Result<Self> {
        for path in config_paths() {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::load_from_path(&path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }
}

/// Get all possible config file paths in priority order.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(proj_dirs) = ProjectDirs::from("io", "scrollgrid", "scrollgrid") {
        paths.push(proj_dirs.config_dir().join("config.toml"));
    }

    paths.push(PathBuf::from("config.toml"));

    paths
}

/// Shared, updatable view of the configuration.
///
/// The pipeline snapshots the configuration once per intent, so a
/// replacement takes effect on the next intent rather than mid-operation.
#[derive(Debug, Clone)]
pub struct SettingsHandle {
    tx: Arc<watch::Sender<Config>>,
}

impl SettingsHandle {
    /// Wrap an initial configuration.
    pub fn new(config: Config) -> Self {
        let (tx, _rx) = watch::channel(config);
        Self { tx: Arc::new(tx) }
    }

    /// Snapshot of the current configuration.
    pub fn current(&self) -> Config {
        self.tx.borrow().clone()
    }

    /// Replace the configuration, e.g. after a reload.
    pub fn replace(&self, config: Config) {
        self.tx.send_replace(config);
    }

    /// Subscribe to configuration changes.
    pub fn subscribe(&self) -> watch::Receiver<Config> {
        self.tx.subscribe()
    }
}
