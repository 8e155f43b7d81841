//! Incremental marker scan
//!
//! Reads a file from a stored line offset to end-of-file and reports every
//! line containing the marker. The returned line count becomes the next
//! offset, so a line is only ever reported by the scan that first sees it.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{WatchError, WatchResult};

/// Scan `reader` from zero-based line `next_line`.
///
/// Calls `on_match` with the 1-based number of every line at or past
/// `next_line` that contains `marker` (literal, case-sensitive). Returns the
/// total number of lines read. A trailing line without `\n` still counts.
/// Lines are decoded lossily, so invalid UTF-8 never hides a marker.
pub fn scan_reader<R, F>(
    mut reader: R,
    next_line: usize,
    marker: &str,
    mut on_match: F,
) -> io::Result<usize>
where
    R: BufRead,
    F: FnMut(usize),
{
    let mut buf = Vec::new();
    let mut index = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if index >= next_line && String::from_utf8_lossy(&buf).contains(marker) {
            on_match(index + 1);
        }
        index += 1;
    }

    Ok(index)
}

/// Scan the file at `path` from `next_line`. See [`scan_reader`].
///
/// The file handle lives only for the duration of this call. Open and read
/// failures map to [`WatchError::FileUnreadable`].
///
/// If the file shrank below `next_line` the smaller line count is returned;
/// lines between the new count and the old offset are not revisited.
pub fn scan_file<F>(path: &Path, next_line: usize, marker: &str, on_match: F) -> WatchResult<usize>
where
    F: FnMut(usize),
{
    let unreadable = |source: io::Error| WatchError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unreadable)?;
    scan_reader(BufReader::new(file), next_line, marker, on_match).map_err(unreadable)
}
