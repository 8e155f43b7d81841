//! Watch event types and options

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{WatchError, WatchResult};

/// Default polling interval in seconds
pub const DEFAULT_INTERVAL_SECS: f64 = 1.0;

/// Default extension filter
pub const DEFAULT_EXTENSION: &str = ".txt";

/// Extra delay after a cycle that found no directory, in seconds
pub const DEFAULT_MISSING_DIR_BACKOFF_SECS: f64 = 2.0;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Directory to poll (not recursive)
    pub directory: PathBuf,
    /// Literal substring to search for
    pub marker: String,
    /// Suffix a file name must end with to be tracked
    pub extension: String,
    /// Sleep between cycles
    pub interval: Duration,
    /// Additional sleep after a cycle that found no directory
    pub missing_dir_backoff: Duration,
}

impl WatchOptions {
    pub fn new(directory: impl Into<PathBuf>, marker: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            marker: marker.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            interval: Duration::from_secs_f64(DEFAULT_INTERVAL_SECS),
            missing_dir_backoff: Duration::from_secs_f64(DEFAULT_MISSING_DIR_BACKOFF_SECS),
        }
    }
}

/// Convert a seconds value from the command line or config into a `Duration`.
pub fn seconds(value: f64) -> WatchResult<Duration> {
    if !value.is_finite() || value < 0.0 {
        return Err(WatchError::InvalidInterval { value });
    }
    Duration::try_from_secs_f64(value).map_err(|_| WatchError::InvalidInterval { value })
}

/// Watch event types for log and NDJSON output
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    WatchStarted {
        directory: String,
        extension: String,
        marker: String,
        interval_secs: f64,
    },
    FileAdded {
        file: String,
    },
    FileRemoved {
        file: String,
    },
    MagicFound {
        file: String,
        line: usize,
        marker: String,
    },
    FileUnreadable {
        file: String,
        message: String,
    },
    DirectoryNotFound {
        directory: String,
    },
    Error {
        message: String,
    },
    Shutdown {
        uptime_secs: f64,
    },
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
