//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;

use gitscope::config::{self, Config};
use gitscope::repository::GitClient;

use crate::commands;

/// gitscope - Probe, compare and synchronise git working copies
#[derive(Parser, Debug)]
#[command(name = "gitscope")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace). RUST_LOG wins when set.
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Configuration file. Defaults to `<config dir>/gitscope/config.yaml`.
    #[arg(long, global = true, value_name = "FILE", env = "GITSCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// The git binary to run, overriding the configuration.
    #[arg(long, global = true, value_name = "BINARY", env = "GITSCOPE_GIT")]
    git: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report whether a directory is inside a git repository
    IsRepo(commands::probe::PathArgs),

    /// List the remotes of a repository
    Remotes(commands::probe::PathArgs),

    /// Show the checked-out local branch
    Branch(commands::probe::PathArgs),

    /// Report whether tracked files carry unstaged or staged modifications
    Modified(commands::probe::PathArgs),

    /// Signed commit distance between two references
    Compare(commands::compare::CompareArgs),

    /// Distance of the current branch from its upstream
    Upstream(commands::compare::UpstreamArgs),

    /// Clone a repository into a path
    Clone(commands::sync::CloneArgs),

    /// Initialise a repository at a path
    Init(commands::sync::InitArgs),

    /// Stage a file
    Add(commands::sync::AddArgs),

    /// Record staged changes
    Commit(commands::sync::CommitArgs),

    /// Fetch every remote
    Fetch(commands::sync::RepoArgs),

    /// Pull a branch from a remote
    Pull(commands::sync::PullArgs),

    /// Fetch, then pull the current branch from the preferred remote
    Update(commands::sync::RepoArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let config = self.resolve_config()?;
        let client = GitClient::new(&config);

        match self.command {
            Commands::IsRepo(args) => commands::probe::is_repo(args, &client),
            Commands::Remotes(args) => commands::probe::remotes(args, &client),
            Commands::Branch(args) => commands::probe::branch(args, &client),
            Commands::Modified(args) => commands::probe::modified(args, &client),
            Commands::Compare(args) => commands::compare::execute(args, &client),
            Commands::Upstream(args) => commands::compare::upstream(args, &client),
            Commands::Clone(args) => commands::sync::clone(args, &client),
            Commands::Init(args) => commands::sync::init(args, &client),
            Commands::Add(args) => commands::sync::add(args, &client),
            Commands::Commit(args) => commands::sync::commit(args, &client),
            Commands::Fetch(args) => commands::sync::fetch(args, &client),
            Commands::Pull(args) => commands::sync::pull(args, &client),
            Commands::Update(args) => commands::sync::update(args, &client),
        }
    }

    fn resolve_config(&self) -> Result<Config> {
        let mut config = config::load(self.config.as_deref()).with_context(|| match &self.config {
            Some(path) => format!("Failed to load config from {}", path.display()),
            None => "Failed to load default configuration".to_string(),
        })?;

        if let Some(git) = &self.git {
            config.binary = git.clone();
        }
        Ok(config)
    }
}

fn init_logging(level: &str) {
    // A second initialisation only happens in tests; ignore it.
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}
