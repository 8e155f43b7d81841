//! Logging setup for the CLI

use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

/// Build the filter: `RUST_LOG` wins, otherwise `level` for everything.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    let directive = match level {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    };

    EnvFilter::builder()
        .with_default_directive(directive.into())
        .from_env_lossy()
}

/// Initialize console logging on stderr.
///
/// stdout stays free for NDJSON events. Colors only when stderr is a TTY.
pub fn init_logging(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
