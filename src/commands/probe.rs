//! # Probe Commands
//!
//! Read-only subcommands: `is-repo`, `remotes`, `branch` and `modified`.
//! None of them change the working copy.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use gitscope::repository::GitClient;

/// Printed by `branch` when HEAD is not on a local branch.
pub const DETACHED: &str = "(detached)";

/// A working copy to inspect
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Directory of the working copy.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,
}

/// Print `true` or `false`. Never fails.
pub fn is_repo(args: PathArgs, client: &GitClient) -> Result<()> {
    println!("{}", client.is_repository(&args.path));
    Ok(())
}

pub fn remotes(args: PathArgs, client: &GitClient) -> Result<()> {
    let remotes = client
        .list_remotes(&args.path)
        .with_context(|| format!("Failed to list remotes of {}", args.path.display()))?;
    for remote in remotes {
        println!("{}", remote);
    }
    Ok(())
}

pub fn branch(args: PathArgs, client: &GitClient) -> Result<()> {
    let branch = client
        .current_branch(&args.path)
        .with_context(|| format!("Failed to read HEAD of {}", args.path.display()))?;
    println!("{}", branch.as_deref().unwrap_or(DETACHED));
    Ok(())
}

pub fn modified(args: PathArgs, client: &GitClient) -> Result<()> {
    let modified = client
        .is_modified(&args.path)
        .with_context(|| format!("Failed to read status of {}", args.path.display()))?;
    println!("{}", modified);
    Ok(())
}
