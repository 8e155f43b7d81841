use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use dirwatcher::logging::init_logging;
use dirwatcher::watcher::{watch, WatchEvent};
use dirwatcher::Config;

use crate::cli::Cli;

pub fn cmd_watch(cli: &Cli) -> Result<()> {
    let working_dir = std::env::current_dir().context("cannot determine working directory")?;
    let loaded = Config::resolve(cli.config.as_deref(), &working_dir)?;

    let mut config = loaded.config;
    cli.apply_overrides(&mut config);

    init_logging(config.logging.level.raised(cli.verbose));

    for warning in &loaded.warnings {
        warn!("{warning}");
    }
    if let Some(source) = &loaded.source {
        debug!(config = %source.display(), "loaded configuration");
    }

    let options = config.watch_options(&cli.directory, &cli.magic_word)?;

    // Set up signal handler (SIGINT, SIGTERM, SIGHUP)
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        warn!("received stop signal, finishing current cycle");
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install signal handler")?;

    let started_at = chrono::Local::now();
    info!(
        pid = std::process::id(),
        started = %started_at.format("%Y-%m-%d %H:%M:%S"),
        "dirwatcher started"
    );

    let json = cli.json;
    let summary = watch(options, running, |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            log_watch_event(&event);
        }
    });

    debug!(
        cycles = summary.cycles,
        added = summary.files_added,
        removed = summary.files_removed,
        scans = summary.scans,
        matches = summary.matches,
        unreadable = summary.unreadable,
        "watch summary"
    );

    Ok(())
}

fn log_watch_event(event: &WatchEvent) {
    match event {
        WatchEvent::WatchStarted {
            directory,
            extension,
            marker,
            interval_secs,
        } => info!(
            directory = %directory,
            extension = %extension,
            marker = %marker,
            interval_secs,
            "watching {directory} for '{marker}' in *{extension} files"
        ),
        WatchEvent::FileAdded { file } => info!(file = %file, "{file} added to watchlist"),
        WatchEvent::FileRemoved { file } => info!(file = %file, "{file} removed from watchlist"),
        WatchEvent::MagicFound { file, line, marker } => info!(
            file = %file,
            line,
            marker = %marker,
            "match found for '{marker}' on line {line} in {file}"
        ),
        WatchEvent::FileUnreadable { file, message } => {
            warn!(file = %file, "skipping {file} this cycle: {message}")
        }
        WatchEvent::DirectoryNotFound { directory } => {
            error!(directory = %directory, "{directory} directory not found")
        }
        WatchEvent::Error { message } => error!("unhandled condition: {message}"),
        WatchEvent::Shutdown { uptime_secs } => {
            info!("dirwatcher stopped, uptime was {uptime_secs:.1}s")
        }
    }
}
