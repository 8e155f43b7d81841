//! dirwatcher - polling directory watcher for magic words
//!
//! Watches one directory for files with a given extension and reports every
//! line where a literal marker appears, exactly once per line, by remembering
//! how many lines of each file have already been scanned.

pub mod config;
pub mod error;
pub mod logging;
pub mod watcher;

// Re-exports for convenience
pub use config::{Config, ConfigWarning, LogLevel};
pub use error::{WatchError, WatchResult};
pub use watcher::{
    run_cycle, scan_file, scan_reader, watch, CycleReport, Reconciliation, TrackedFile,
    WatchEvent, WatchOptions, WatchSet, WatchSummary,
};
