//! Configuration type definitions

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::WatchResult;
use crate::watcher::{
    seconds, WatchOptions, DEFAULT_EXTENSION, DEFAULT_INTERVAL_SECS,
    DEFAULT_MISSING_DIR_BACKOFF_SECS,
};

use super::loader::{self, LoadedConfig};

/// Polling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Seconds between cycles
    #[serde(default = "default_interval")]
    pub interval: f64,

    /// File name suffix to track
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Extra seconds to wait after a cycle that found no directory
    #[serde(default = "default_backoff")]
    pub missing_dir_backoff: f64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            extension: default_extension(),
            missing_dir_backoff: default_backoff(),
        }
    }
}

fn default_interval() -> f64 {
    DEFAULT_INTERVAL_SECS
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_backoff() -> f64 {
    DEFAULT_MISSING_DIR_BACKOFF_SECS
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse a level name, case-insensitive. `off` maps to `error`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "off" | "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    /// Raise the level by `steps` (one per `-v`), saturating at trace
    pub fn raised(self, steps: u8) -> Self {
        let mut level = self;
        for _ in 0..steps {
            level = match level {
                LogLevel::Error => LogLevel::Warn,
                LogLevel::Warn => LogLevel::Info,
                LogLevel::Info => LogLevel::Debug,
                LogLevel::Debug | LogLevel::Trace => LogLevel::Trace,
            };
        }
        level
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load from an explicit file, the working directory, the user config
    /// directory, or defaults, then apply environment overrides.
    pub fn resolve(explicit: Option<&Path>, working_dir: &Path) -> WatchResult<LoadedConfig> {
        loader::resolve(explicit, working_dir)
    }

    /// Apply environment variable overrides (DIRWATCHER_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn interval(&self) -> WatchResult<Duration> {
        seconds(self.watch.interval)
    }

    pub fn missing_dir_backoff(&self) -> WatchResult<Duration> {
        seconds(self.watch.missing_dir_backoff)
    }

    /// Build watch options for `directory` and `marker` from this config
    pub fn watch_options(&self, directory: &Path, marker: &str) -> WatchResult<WatchOptions> {
        let mut options = WatchOptions::new(directory, marker);
        options.extension = self.watch.extension.clone();
        options.interval = self.interval()?;
        options.missing_dir_backoff = self.missing_dir_backoff()?;
        Ok(options)
    }
}
