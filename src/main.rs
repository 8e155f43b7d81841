//! dirwatcher CLI
//!
//! Usage: dirwatcher [OPTIONS] <DIRECTORY> <MAGIC_WORD>
//!
//! Polls DIRECTORY every `--interval` seconds and logs each line of a
//! `--extension` file that contains MAGIC_WORD, once.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::watch::cmd_watch(&cli)
}
