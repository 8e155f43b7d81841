//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{WatchError, WatchResult};

use super::types::{Config, LogLevel};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "dirwatcher.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

/// Configuration plus where it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config was read from, `None` for built-in defaults
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> WatchResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

pub(crate) fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> WatchResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| WatchError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Pick the config file to use, in priority order:
/// 1. `explicit` (must exist)
/// 2. `<working_dir>/dirwatcher.toml`
/// 3. `<user config dir>/dirwatcher/config.toml`
///
/// Falls back to defaults when none exists. Environment overrides are
/// applied on top in every case.
pub fn resolve(explicit: Option<&Path>, working_dir: &Path) -> WatchResult<LoadedConfig> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => discover(working_dir),
    };

    let mut loaded = LoadedConfig::default();
    if let Some(path) = candidate {
        let (config, warnings) = load_with_warnings(&path)?;
        loaded = LoadedConfig {
            config,
            source: Some(path),
            warnings,
        };
    }

    loaded.config = with_env_overrides(loaded.config);
    Ok(loaded)
}

fn discover(working_dir: &Path) -> Option<PathBuf> {
    let local = working_dir.join(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("dirwatcher").join("config.toml"))
        .filter(|user| user.is_file())
}

/// Apply environment variable overrides (DIRWATCHER_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides from `lookup`. Values that do not parse are ignored.
pub(crate) fn with_overrides_from(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Config {
    // DIRWATCHER_INTERVAL
    if let Some(interval) = lookup("DIRWATCHER_INTERVAL").and_then(|v| v.trim().parse().ok()) {
        config.watch.interval = interval;
    }

    // DIRWATCHER_EXTENSION
    if let Some(extension) = lookup("DIRWATCHER_EXTENSION") {
        config.watch.extension = extension;
    }

    // DIRWATCHER_BACKOFF
    if let Some(backoff) = lookup("DIRWATCHER_BACKOFF").and_then(|v| v.trim().parse().ok()) {
        config.watch.missing_dir_backoff = backoff;
    }

    // DIRWATCHER_LOG_LEVEL
    if let Some(level) = lookup("DIRWATCHER_LOG_LEVEL").and_then(|v| LogLevel::parse(&v)) {
        config.logging.level = level;
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "watch",
        "interval",
        "extension",
        "missing_dir_backoff",
        "logging",
        "level",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
