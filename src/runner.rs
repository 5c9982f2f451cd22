//! # Command Runners
//!
//! A [`CommandRunner`] runs one `git` subcommand inside a repository location
//! and returns the captured [`CommandResult`]. It is the seam between the
//! repository client and the operating system: the client only decides which
//! arguments to pass and how to read the answer.
//!
//! Two implementations are provided:
//!
//! - **`DirectRunner`**: hands the directory to the child process. The
//!   process working directory is never touched and no lock is taken.
//! - **`ScopedRunner`**: enters the directory with [`crate::scope::run_scoped`]
//!   and runs the child there, serialised with every other scoped call in the
//!   process.
//!
//! Both reject a location that is not an existing directory with
//! `InvalidLocation` before spawning anything. Tests substitute mock runners.

use std::path::{Path, PathBuf};

use crate::config::{Config, ExecutionMode};
use crate::error::{Error, Result};
use crate::exec::{self, CommandResult};
use crate::scope;

/// Trait for running git subcommands - allows mocking in tests
pub trait CommandRunner: Send + Sync {
    /// Run `git <args...>` with `directory` as its working directory.
    fn run(&self, directory: &Path, args: &[&str]) -> Result<CommandResult>;
}

/// Runs commands with an explicit child working directory.
#[derive(Debug, Clone)]
pub struct DirectRunner {
    program: PathBuf,
    env: Vec<(String, String)>,
}

impl DirectRunner {
    pub fn new(config: &Config) -> Self {
        Self {
            program: config.binary.clone(),
            env: config.child_env(),
        }
    }
}

impl CommandRunner for DirectRunner {
    fn run(&self, directory: &Path, args: &[&str]) -> Result<CommandResult> {
        ensure_directory(directory)?;
        exec::execute_with_env(&self.program, args, Some(directory), &self.env)
    }
}

/// Runs commands after changing the process working directory.
#[derive(Debug, Clone)]
pub struct ScopedRunner {
    program: PathBuf,
    env: Vec<(String, String)>,
}

impl ScopedRunner {
    pub fn new(config: &Config) -> Self {
        Self {
            program: absolutize(&config.binary),
            env: config.child_env(),
        }
    }
}

impl CommandRunner for ScopedRunner {
    fn run(&self, directory: &Path, args: &[&str]) -> Result<CommandResult> {
        scope::run_scoped(directory, || {
            exec::execute_with_env(&self.program, args, None, &self.env)
        })?
    }
}

/// Build the runner selected by `config.mode`.
pub fn from_config(config: &Config) -> Box<dyn CommandRunner> {
    match config.mode {
        ExecutionMode::Direct => Box::new(DirectRunner::new(config)),
        ExecutionMode::Scoped => Box::new(ScopedRunner::new(config)),
    }
}

fn ensure_directory(directory: &Path) -> Result<()> {
    if directory.is_dir() {
        Ok(())
    } else {
        Err(Error::InvalidLocation {
            path: directory.to_path_buf(),
        })
    }
}

// A relative binary path such as `./bin/git` would otherwise be resolved
// against whichever directory the scope has just entered.
fn absolutize(program: &Path) -> PathBuf {
    if program.is_absolute() || program.components().count() == 1 {
        return program.to_path_buf();
    }
    std::path::absolute(program).unwrap_or_else(|_| program.to_path_buf())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn shell_config(mode: ExecutionMode) -> Config {
        // `sh` stands in for git, so the arguments become `-c <script>`.
        Config {
            binary: PathBuf::from("sh"),
            mode,
            ..Config::default()
        }
    }

    #[test]
    fn test_direct_runner_runs_in_directory() {
        let temp_dir = TempDir::new().unwrap();
        let runner = DirectRunner::new(&shell_config(ExecutionMode::Direct));

        let result = runner.run(temp_dir.path(), &["-c", "pwd -P"]).unwrap();

        assert_eq!(
            PathBuf::from(result.stdout.trim()),
            temp_dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    #[serial]
    fn test_scoped_runner_runs_in_directory_and_restores() {
        let temp_dir = TempDir::new().unwrap();
        let before = std::env::current_dir().unwrap();
        let runner = ScopedRunner::new(&shell_config(ExecutionMode::Scoped));

        let result = runner.run(temp_dir.path(), &["-c", "pwd -P"]).unwrap();

        assert_eq!(
            PathBuf::from(result.stdout.trim()),
            temp_dir.path().canonicalize().unwrap()
        );
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_runners_pass_configured_env() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = shell_config(ExecutionMode::Direct);
        config
            .env
            .insert("GITSCOPE_MARKER".to_string(), "x1".to_string());
        let runner = DirectRunner::new(&config);

        let result = runner
            .run(
                temp_dir.path(),
                &["-c", "echo $GITSCOPE_MARKER $GIT_TERMINAL_PROMPT"],
            )
            .unwrap();
        assert_eq!(result.stdout.trim(), "x1 0");
    }

    #[test]
    #[serial]
    fn test_invalid_location_is_rejected_by_both_runners() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        for mode in [ExecutionMode::Direct, ExecutionMode::Scoped] {
            let runner = from_config(&shell_config(mode));
            let err = runner.run(&missing, &["-c", "true"]).unwrap_err();
            assert!(matches!(err, Error::InvalidLocation { .. }), "{mode:?}");
        }
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(absolutize(Path::new("git")), PathBuf::from("git"));
        assert_eq!(
            absolutize(Path::new("/usr/bin/git")),
            PathBuf::from("/usr/bin/git")
        );
        assert!(absolutize(Path::new("./bin/git")).is_absolute());
    }
}
