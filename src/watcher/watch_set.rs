//! Tracked files and directory-listing reconciliation
//!
//! Names are kept as the `OsString`s the directory listing returns, so a
//! file whose name is not valid UTF-8 is still opened by its real path.

use std::collections::{BTreeMap, HashSet};
use std::ffi::{OsStr, OsString};

/// One file currently under watch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFile {
    /// File base name, unique within the watch set
    pub name: OsString,
    /// Zero-based index of the first line not yet scanned
    pub next_line: usize,
}

impl TrackedFile {
    /// Name for events and logs; invalid UTF-8 is replaced
    pub fn display_name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }
}

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Names that started being tracked, in listing order
    pub added: Vec<OsString>,
    /// Names that stopped being tracked, sorted
    pub removed: Vec<OsString>,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Returns true if `name` ends with the configured extension.
///
/// Literal, case-sensitive suffix test on the raw name bytes: `notes.TXT`
/// does not match `.txt`.
pub fn matches_extension(name: impl AsRef<OsStr>, extension: &str) -> bool {
    name.as_ref()
        .as_encoded_bytes()
        .ends_with(extension.as_bytes())
}

/// Mapping from tracked file name to its next unread line.
///
/// Iteration is ordered by name so cycle output is deterministic.
#[derive(Debug, Clone, Default)]
pub struct WatchSet {
    files: BTreeMap<OsString, usize>,
}

impl WatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, name: impl AsRef<OsStr>) -> bool {
        self.files.contains_key(name.as_ref())
    }

    /// Stored offset for `name`, if tracked
    pub fn next_line(&self, name: impl AsRef<OsStr>) -> Option<usize> {
        self.files.get(name.as_ref()).copied()
    }

    /// Store the offset returned by a scan. Untracked names are ignored.
    pub fn set_next_line(&mut self, name: impl AsRef<OsStr>, next_line: usize) {
        if let Some(offset) = self.files.get_mut(name.as_ref()) {
            *offset = next_line;
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &OsStr> {
        self.files.keys().map(OsString::as_os_str)
    }

    /// Snapshot of the tracked files, ordered by name
    pub fn tracked(&self) -> Vec<TrackedFile> {
        self.files
            .iter()
            .map(|(name, &next_line)| TrackedFile {
                name: name.clone(),
                next_line,
            })
            .collect()
    }

    /// Bring the set in line with a fresh directory listing.
    ///
    /// Names matching `extension` that are not yet tracked start at line 0.
    /// Tracked names absent from the listing are dropped. Offsets of names
    /// present in both are kept.
    pub fn reconcile<I, S>(&mut self, listing: I, extension: &str) -> Reconciliation
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut present: HashSet<OsString> = HashSet::new();
        let mut added = Vec::new();

        for name in listing {
            let name = name.as_ref();
            present.insert(name.to_os_string());
            if matches_extension(name, extension) && !self.files.contains_key(name) {
                self.files.insert(name.to_os_string(), 0);
                added.push(name.to_os_string());
            }
        }

        let removed: Vec<OsString> = self
            .files
            .keys()
            .filter(|name| !present.contains(name.as_os_str()))
            .cloned()
            .collect();
        for name in &removed {
            self.files.remove(name);
        }

        Reconciliation { added, removed }
    }
}
