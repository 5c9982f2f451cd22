//! # Repository Client
//!
//! `GitClient` is the high-level interface callers use to probe, mutate and
//! compare working copies. It owns a [`CommandRunner`] and turns each request
//! into one (occasionally two) `git` invocations plus a reading of the result.
//!
//! ## Failure policy
//!
//! Mutating and query operations return `Result` and attach the tool's
//! diagnostic to any failure. Preconditions (an existing directory, being
//! inside a repository, having a remote) are checked before the command that
//! depends on them is spawned.
//!
//! Two probes are deliberately lenient and answer with a plain `bool`:
//!
//! - [`GitClient::is_repository`] turns every failure into `false`. Use
//!   [`GitClient::probe_repository`] to see the underlying error instead.
//! - [`GitClient::is_modified`] turns a failed status query into `false`
//!   once the repository precondition holds.
//!
//! Swallowed errors are logged at `debug` level.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::compare;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::exec::{display_args, is_option_like, CommandResult};
use crate::parse;
use crate::runner::{self, CommandRunner};

/// The remote `update` prefers when a repository has several.
pub const DEFAULT_REMOTE: &str = "origin";

/// Result of [`GitClient::compare_with_upstream`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamDistance {
    pub branch: String,
    pub upstream: String,
    /// Signed distance of `branch` relative to `upstream`.
    pub distance: i64,
}

/// Entry point for git operations on working copies.
pub struct GitClient {
    runner: Box<dyn CommandRunner>,
}

impl GitClient {
    /// Creates a client whose runner is chosen by `config.mode`.
    pub fn new(config: &Config) -> Self {
        Self {
            runner: runner::from_config(config),
        }
    }

    /// Creates a client with a custom runner.
    ///
    /// This is primarily used for testing to inject mock runners.
    pub fn with_runner(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    // ------------------------------------------------------------------
    // Probes
    // ------------------------------------------------------------------

    /// Whether `status` succeeds at `path`.
    ///
    /// # Errors
    ///
    /// `InvalidLocation` for a path that is not a directory, `Io` when the
    /// binary cannot be run.
    pub fn probe_repository(&self, path: &Path) -> Result<bool> {
        let result = self.runner.run(path, &["status"])?;
        Ok(result.success())
    }

    /// Lenient form of [`probe_repository`](Self::probe_repository): never
    /// fails, any error reads as "not a repository".
    pub fn is_repository(&self, path: &Path) -> bool {
        self.probe_repository(path).unwrap_or_else(|e| {
            debug!("repository probe at {} failed: {}", path.display(), e);
            false
        })
    }

    /// Names of the configured remotes, in the order `git remote` lists them.
    ///
    /// # Errors
    ///
    /// `NotARepository` outside a repository, `OperationFailed` when the
    /// listing itself fails.
    pub fn list_remotes(&self, path: &Path) -> Result<Vec<String>> {
        self.require_repository(path)?;
        let result = self.checked(path, &["remote"])?;
        Ok(parse::parse_remotes(&result.stdout))
    }

    /// The checked-out local branch, or `None` when HEAD is not of the form
    /// `refs/heads/<name>` (detached HEAD, nested branch names).
    ///
    /// # Errors
    ///
    /// `InvalidLocation` or `Io` when the query cannot be run at all.
    pub fn current_branch(&self, path: &Path) -> Result<Option<String>> {
        let result = self.runner.run(path, &["symbolic-ref", "HEAD"])?;
        if !result.success() {
            debug!(
                "symbolic-ref HEAD at {} exited {}: {}",
                path.display(),
                result.status,
                result.stderr.trim()
            );
            return Ok(None);
        }
        Ok(parse::parse_branch_ref(&result.stdout))
    }

    /// The upstream of `branch` (for example `origin/main`).
    ///
    /// # Errors
    ///
    /// `OperationFailed` when the branch has no upstream configured.
    pub fn upstream_of(&self, path: &Path, branch: &str) -> Result<String> {
        reject_option_like("rev-parse", branch)?;
        let spec = format!("{}@{{u}}", branch);
        let result = self.checked(
            path,
            &[
                "rev-parse",
                "--abbrev-ref",
                "--symbolic-full-name",
                spec.as_str(),
            ],
        )?;
        parse::parse_upstream(&result.stdout).ok_or_else(|| Error::OperationFailed {
            command: format!("git rev-parse --abbrev-ref --symbolic-full-name {}", spec),
            diagnostic: "no upstream reported".to_string(),
        })
    }

    /// Whether any entry of `status --porcelain` carries a modified flag.
    ///
    /// # Errors
    ///
    /// `NotARepository` outside a repository. A failing status query after
    /// that reads as unmodified.
    pub fn is_modified(&self, path: &Path) -> Result<bool> {
        self.require_repository(path)?;
        match self.runner.run(path, &["status", "--porcelain"]) {
            Ok(result) if result.success() => Ok(parse::porcelain_has_modification(&result.stdout)),
            Ok(result) => {
                debug!(
                    "status --porcelain at {} exited {}: {}",
                    path.display(),
                    result.status,
                    result.stderr.trim()
                );
                Ok(false)
            }
            Err(e) => {
                debug!("status --porcelain at {} failed: {}", path.display(), e);
                Ok(false)
            }
        }
    }

    // ------------------------------------------------------------------
    // Comparison
    // ------------------------------------------------------------------

    /// Signed commit distance of `lhs` relative to `rhs`; see [`compare`].
    ///
    /// # Errors
    ///
    /// `InvalidLocation` or `ComparisonFailed`.
    pub fn compare(&self, lhs: &str, rhs: &str, path: &Path) -> Result<i64> {
        compare::compare(self.runner.as_ref(), lhs, rhs, path)
    }

    /// Distance of the current branch relative to its upstream.
    ///
    /// # Errors
    ///
    /// `OperationFailed` for a detached HEAD or a branch without upstream,
    /// otherwise as [`compare`](Self::compare).
    pub fn compare_with_upstream(&self, path: &Path) -> Result<UpstreamDistance> {
        let branch = self.require_branch(path)?;
        let upstream = self.upstream_of(path, &branch)?;
        let distance = self.compare(&branch, &upstream, path)?;
        Ok(UpstreamDistance {
            branch,
            upstream,
            distance,
        })
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// `git clone <url> <path>`, run from the parent of `path`.
    ///
    /// # Errors
    ///
    /// `OperationFailed` when the clone fails, `Io` when the parent cannot be
    /// created.
    pub fn clone(&self, url: &str, path: &Path) -> Result<()> {
        reject_option_like("clone", url)?;
        let target = std::path::absolute(path)?;
        let parent = match target.parent() {
            Some(parent) => parent.to_path_buf(),
            None => {
                return Err(Error::InvalidLocation {
                    path: path.to_path_buf(),
                })
            }
        };
        fs::create_dir_all(&parent)?;

        info!("cloning {} into {}", url, target.display());
        self.checked(&parent, &["clone", url, path_arg(&target)?])?;
        Ok(())
    }

    /// `git init <path>`, creating `path` first when needed.
    ///
    /// # Errors
    ///
    /// `OperationFailed` when init fails, `Io` when `path` cannot be created.
    pub fn init(&self, path: &Path) -> Result<()> {
        let target = std::path::absolute(path)?;
        fs::create_dir_all(&target)?;
        self.checked(&target, &["init", path_arg(&target)?])?;
        Ok(())
    }

    /// `git add <file>` inside the repository at `path`.
    ///
    /// # Errors
    ///
    /// `NotARepository` or `OperationFailed`.
    pub fn add(&self, path: &Path, file: &str) -> Result<()> {
        reject_option_like("add", file)?;
        self.require_repository(path)?;
        self.checked(path, &["add", file])?;
        Ok(())
    }

    /// `git commit -m <message>` inside the repository at `path`.
    ///
    /// # Errors
    ///
    /// `NotARepository` or `OperationFailed` (including "nothing to commit").
    pub fn commit(&self, path: &Path, message: &str) -> Result<()> {
        self.require_repository(path)?;
        self.checked(path, &["commit", "-m", message])?;
        Ok(())
    }

    /// `git fetch --all`.
    ///
    /// # Errors
    ///
    /// `NotARepository` or `OperationFailed`.
    pub fn fetch_all(&self, path: &Path) -> Result<()> {
        self.require_repository(path)?;
        self.checked(path, &["fetch", "--all"])?;
        Ok(())
    }

    /// `git pull <remote> <branch>`.
    ///
    /// # Errors
    ///
    /// `NotARepository`, `NoRemoteConfigured` when the repository has no
    /// remotes at all, or `OperationFailed`.
    pub fn pull(&self, path: &Path, remote: &str, branch: &str) -> Result<()> {
        reject_option_like("pull", remote)?;
        reject_option_like("pull", branch)?;
        if self.list_remotes(path)?.is_empty() {
            return Err(Error::NoRemoteConfigured {
                path: path.to_path_buf(),
            });
        }
        self.checked(path, &["pull", remote, branch])?;
        Ok(())
    }

    /// Fetch all remotes, then pull the current branch from the preferred
    /// remote (`origin` when configured, the first listed otherwise).
    ///
    /// Returns the remote and branch that were pulled.
    ///
    /// # Errors
    ///
    /// `NotARepository`, `NoRemoteConfigured`, `OperationFailed` for a
    /// detached HEAD or a failing fetch or pull.
    pub fn update(&self, path: &Path) -> Result<(String, String)> {
        let remotes = self.list_remotes(path)?;
        let remote = select_remote(&remotes).ok_or_else(|| Error::NoRemoteConfigured {
            path: path.to_path_buf(),
        })?;
        let branch = self.require_branch(path)?;

        self.checked(path, &["fetch", "--all"])?;
        info!("pulling {} {} in {}", remote, branch, path.display());
        self.checked(path, &["pull", remote.as_str(), branch.as_str()])?;
        Ok((remote, branch))
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn require_repository(&self, path: &Path) -> Result<()> {
        if self.is_repository(path) {
            Ok(())
        } else {
            Err(Error::NotARepository {
                path: path.to_path_buf(),
            })
        }
    }

    fn require_branch(&self, path: &Path) -> Result<String> {
        self.current_branch(path)?
            .ok_or_else(|| Error::OperationFailed {
                command: "git symbolic-ref HEAD".to_string(),
                diagnostic: "HEAD is not on a local branch".to_string(),
            })
    }

    /// Run a command and turn a spawn failure or non-zero exit into
    /// `OperationFailed`.
    fn checked(&self, path: &Path, args: &[&str]) -> Result<CommandResult> {
        let command = format!("git {}", display_args(args));
        let result = match self.runner.run(path, args) {
            Ok(result) => result,
            Err(e @ Error::InvalidLocation { .. }) => return Err(e),
            Err(e) => {
                return Err(Error::OperationFailed {
                    command,
                    diagnostic: e.to_string(),
                })
            }
        };

        if result.success() {
            Ok(result)
        } else {
            Err(Error::operation_failed(command, &result.stderr, &result.stdout))
        }
    }
}

fn select_remote(remotes: &[String]) -> Option<String> {
    remotes
        .iter()
        .find(|r| r.as_str() == DEFAULT_REMOTE)
        .or_else(|| remotes.first())
        .cloned()
}

/// Operands starting with `-` would reach git as options; refuse them before
/// anything is spawned.
fn reject_option_like(subcommand: &str, operand: &str) -> Result<()> {
    if is_option_like(operand) {
        return Err(Error::OperationFailed {
            command: format!("git {} {}", subcommand, operand),
            diagnostic: format!("operand '{}' must not start with '-'", operand),
        });
    }
    Ok(())
}

fn path_arg(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| Error::InvalidLocation {
        path: path.to_path_buf(),
    })
}
