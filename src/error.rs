//! Error types for dirwatcher
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dirwatcher operations
pub type WatchResult<T> = Result<T, WatchError>;

/// Main error type for dirwatcher operations
#[derive(Error, Debug)]
pub enum WatchError {
    /// The watched directory does not exist
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// A tracked file could not be opened or read during its scan
    #[error("cannot read {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Polling interval is negative, NaN or infinite
    #[error("invalid interval '{value}': must be a finite number of seconds >= 0")]
    InvalidInterval { value: f64 },
}

impl WatchError {
    /// Returns true for conditions the watch loop recovers from with a back-off
    pub fn is_directory_not_found(&self) -> bool {
        matches!(self, WatchError::DirectoryNotFound { .. })
    }
}
