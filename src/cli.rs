use std::path::PathBuf;

use clap::Parser;
use dirwatcher::Config;

/// dirwatcher - watch a directory of text files for a magic word
#[derive(Parser, Debug)]
#[command(name = "dirwatcher")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Press Ctrl+C (or send SIGTERM) to stop; uptime is logged on exit.")]
pub struct Cli {
    /// Directory to monitor
    pub directory: PathBuf,

    /// The magic word to watch for (literal, case-sensitive)
    pub magic_word: String,

    /// Seconds between directory checks [default: 1.0]
    #[arg(short, long, allow_negative_numbers = true)]
    pub interval: Option<f64>,

    /// File name suffix to watch [default: .txt]
    #[arg(short = 'x', long)]
    pub extension: Option<String>,

    /// Emit watch events as NDJSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Configuration file (defaults to ./dirwatcher.toml if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Command-line flags take precedence over file and environment settings
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(interval) = self.interval {
            config.watch.interval = interval;
        }
        if let Some(extension) = &self.extension {
            config.watch.extension = extension.clone();
        }
    }
}
