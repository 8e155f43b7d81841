//! Configuration module for dirwatcher
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DIRWATCHER_*)
//! 3. Config file (`--config`, `./dirwatcher.toml`, or `~/.config/dirwatcher/config.toml`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{ConfigWarning, LoadedConfig, LOCAL_CONFIG_FILE};
pub use types::{Config, LogLevel, LoggingConfig, WatchConfig};
