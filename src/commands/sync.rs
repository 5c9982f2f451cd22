//! # Sync Commands
//!
//! Subcommands that change a working copy: `clone`, `init`, `add`, `commit`,
//! `fetch`, `pull` and `update`. Each one is a single call into `GitClient`;
//! failures carry the diagnostic git printed.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use gitscope::repository::GitClient;

/// Clone a repository
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Repository URL or local path to clone from.
    #[arg(value_name = "URL")]
    pub url: String,

    /// Destination directory.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Initialise a repository
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialise; created when missing.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,
}

/// A working copy to act on
#[derive(Args, Debug)]
pub struct RepoArgs {
    /// Directory of the working copy.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub path: PathBuf,
}

/// Stage a file
#[derive(Args, Debug)]
pub struct AddArgs {
    /// File to stage, relative to the working copy.
    #[arg(value_name = "FILE")]
    pub file: String,

    #[command(flatten)]
    pub repo: RepoArgs,
}

/// Record staged changes
#[derive(Args, Debug)]
pub struct CommitArgs {
    /// Commit message.
    #[arg(short, long, value_name = "MSG")]
    pub message: String,

    #[command(flatten)]
    pub repo: RepoArgs,
}

/// Pull a branch from a remote
#[derive(Args, Debug)]
pub struct PullArgs {
    #[arg(value_name = "REMOTE")]
    pub remote: String,

    #[arg(value_name = "BRANCH")]
    pub branch: String,

    #[command(flatten)]
    pub repo: RepoArgs,
}

pub fn clone(args: CloneArgs, client: &GitClient) -> Result<()> {
    client
        .clone(&args.url, &args.path)
        .with_context(|| format!("Failed to clone {} into {}", args.url, args.path.display()))?;
    println!("Cloned {} into {}", args.url, args.path.display());
    Ok(())
}

pub fn init(args: InitArgs, client: &GitClient) -> Result<()> {
    client
        .init(&args.path)
        .with_context(|| format!("Failed to initialise {}", args.path.display()))?;
    println!("Initialised {}", args.path.display());
    Ok(())
}

pub fn add(args: AddArgs, client: &GitClient) -> Result<()> {
    client
        .add(&args.repo.path, &args.file)
        .with_context(|| format!("Failed to stage {}", args.file))?;
    Ok(())
}

pub fn commit(args: CommitArgs, client: &GitClient) -> Result<()> {
    client
        .commit(&args.repo.path, &args.message)
        .with_context(|| format!("Failed to commit in {}", args.repo.path.display()))?;
    Ok(())
}

pub fn fetch(args: RepoArgs, client: &GitClient) -> Result<()> {
    client
        .fetch_all(&args.path)
        .with_context(|| format!("Failed to fetch in {}", args.path.display()))?;
    Ok(())
}

pub fn pull(args: PullArgs, client: &GitClient) -> Result<()> {
    client
        .pull(&args.repo.path, &args.remote, &args.branch)
        .with_context(|| format!("Failed to pull {} {}", args.remote, args.branch))?;
    Ok(())
}

pub fn update(args: RepoArgs, client: &GitClient) -> Result<()> {
    let (remote, branch) = client
        .update(&args.path)
        .with_context(|| format!("Failed to update {}", args.path.display()))?;
    println!("Updated {} from {}", branch, remote);
    Ok(())
}
