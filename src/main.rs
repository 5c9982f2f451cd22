//! # gitscope CLI
//!
//! Binary entry point for the `gitscope` command-line tool.
//!
//! It parses arguments with `clap`, initialises logging, resolves the
//! configuration and hands the selected subcommand a ready `GitClient`. All
//! git logic lives in the library crate; the binary only formats results.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
