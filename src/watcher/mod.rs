//! Directory watcher for magic-word detection
//!
//! Implements the polling watch with:
//! - Extension-filtered, non-recursive directory reconciliation
//! - Incremental per-file scanning from a stored line offset
//! - Graceful Ctrl+C / SIGTERM shutdown between cycles
//! - NDJSON output for CI

mod event;
mod poll;
mod scan;
mod watch_set;

pub use event::{
    seconds, WatchEvent, WatchOptions, DEFAULT_EXTENSION, DEFAULT_INTERVAL_SECS,
    DEFAULT_MISSING_DIR_BACKOFF_SECS,
};
pub use poll::{list_directory, run_cycle, watch, CycleReport, WatchSummary};
pub use scan::{scan_file, scan_reader};
pub use watch_set::{matches_extension, Reconciliation, TrackedFile, WatchSet};
