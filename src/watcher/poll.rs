//! Polling loop: list, reconcile, scan, sleep

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{WatchError, WatchResult};

use super::event::{WatchEvent, WatchOptions};
use super::scan::scan_file;
use super::watch_set::WatchSet;

/// Longest uninterrupted sleep; bounds how long a stop request waits
const SLEEP_SLICE_MS: u64 = 50;

/// Counters for a single polling cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub added: usize,
    pub removed: usize,
    pub scanned: usize,
    pub matches: usize,
    pub unreadable: usize,
}

/// Totals for a whole watch session
#[derive(Debug, Clone, Default)]
pub struct WatchSummary {
    pub cycles: u64,
    pub files_added: u64,
    pub files_removed: u64,
    pub scans: u64,
    pub matches: u64,
    pub unreadable: u64,
    pub uptime: Duration,
}

impl WatchSummary {
    /// Fold the counters of a completed cycle into the session totals
    pub fn record(&mut self, report: &CycleReport) {
        self.files_added += report.added as u64;
        self.files_removed += report.removed as u64;
        self.scans += report.scanned as u64;
        self.matches += report.matches as u64;
        self.unreadable += report.unreadable as u64;
    }
}

/// File names in `directory`, in the order the OS returns them
pub fn list_directory(directory: &Path) -> WatchResult<Vec<OsString>> {
    let entries = fs::read_dir(directory).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => WatchError::DirectoryNotFound {
            path: directory.to_path_buf(),
        },
        _ => WatchError::Io(e),
    })?;

    let mut names = Vec::new();
    for entry in entries {
        names.push(entry?.file_name());
    }
    Ok(names)
}

/// Run one full cycle against `watch_set`.
///
/// A file that fails to read is reported and skipped with its offset left
/// unchanged; the remaining files are still scanned. Only a failure to list
/// the directory aborts the cycle.
pub fn run_cycle(
    options: &WatchOptions,
    watch_set: &mut WatchSet,
    event_callback: &impl Fn(WatchEvent),
) -> WatchResult<CycleReport> {
    let listing = list_directory(&options.directory)?;
    let changes = watch_set.reconcile(&listing, &options.extension);

    let mut report = CycleReport {
        added: changes.added.len(),
        removed: changes.removed.len(),
        ..CycleReport::default()
    };

    for name in changes.added {
        event_callback(WatchEvent::FileAdded {
            file: name.to_string_lossy().into_owned(),
        });
    }
    for name in changes.removed {
        event_callback(WatchEvent::FileRemoved {
            file: name.to_string_lossy().into_owned(),
        });
    }

    for tracked in watch_set.tracked() {
        let file = tracked.display_name();
        let path = options.directory.join(&tracked.name);
        let result = scan_file(&path, tracked.next_line, &options.marker, |line| {
            report.matches += 1;
            event_callback(WatchEvent::MagicFound {
                file: file.clone(),
                line,
                marker: options.marker.clone(),
            });
        });

        match result {
            Ok(next_line) => {
                watch_set.set_next_line(&tracked.name, next_line);
                report.scanned += 1;
            }
            Err(e) => {
                report.unreadable += 1;
                event_callback(WatchEvent::FileUnreadable {
                    file,
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// Poll `options.directory` until `running` is cleared.
///
/// `running` is read once at the top of every iteration, so a cycle that has
/// started always completes. Nothing inside a cycle stops the loop: a missing
/// directory adds the back-off delay, anything else is reported as
/// [`WatchEvent::Error`].
pub fn watch(
    options: WatchOptions,
    running: Arc<AtomicBool>,
    event_callback: impl Fn(WatchEvent),
) -> WatchSummary {
    let started = Instant::now();

    event_callback(WatchEvent::WatchStarted {
        directory: options.directory.display().to_string(),
        extension: options.extension.clone(),
        marker: options.marker.clone(),
        interval_secs: options.interval.as_secs_f64(),
    });

    let mut watch_set = WatchSet::new();
    let mut summary = WatchSummary::default();

    while running.load(Ordering::SeqCst) {
        summary.cycles += 1;

        match run_cycle(&options, &mut watch_set, &event_callback) {
            Ok(report) => summary.record(&report),
            Err(e) if e.is_directory_not_found() => {
                event_callback(WatchEvent::DirectoryNotFound {
                    directory: options.directory.display().to_string(),
                });
                sleep_while_running(&running, options.missing_dir_backoff);
            }
            Err(e) => event_callback(WatchEvent::Error {
                message: e.to_string(),
            }),
        }

        sleep_while_running(&running, options.interval);
    }

    summary.uptime = started.elapsed();
    event_callback(WatchEvent::Shutdown {
        uptime_secs: summary.uptime.as_secs_f64(),
    });

    summary
}

/// Sleep for `total`, waking every slice to check `running`.
///
/// A `total` too large to add to the current instant sleeps until stopped.
fn sleep_while_running(running: &AtomicBool, total: Duration) {
    let deadline = Instant::now().checked_add(total);
    let slice = Duration::from_millis(SLEEP_SLICE_MS);

    while running.load(Ordering::SeqCst) {
        let wait = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                slice.min(deadline - now)
            }
            None => slice,
        };
        std::thread::sleep(wait);
    }
}
