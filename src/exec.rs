//! Subprocess execution primitive.
//!
//! [`execute`] spawns a child process, drains both output streams, blocks
//! until it exits and hands back a [`CommandResult`]. A non-zero exit status
//! is not an error at this layer; interpreting it is the caller's job.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::Result;

/// Captured outcome of one subprocess invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code, or `-1` when the process was terminated by a signal.
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Run `program args...` and capture its output.
///
/// `working_dir` sets the child's directory without touching the working
/// directory of the current process. Spawn failures (program not found,
/// permission denied) surface as [`crate::error::Error::Io`].
pub fn execute<S: AsRef<OsStr>>(
    program: impl AsRef<OsStr>,
    args: &[S],
    working_dir: Option<&Path>,
) -> Result<CommandResult> {
    execute_with_env(program, args, working_dir, &[])
}

/// Like [`execute`], with extra environment variables set on the child.
pub fn execute_with_env<S: AsRef<OsStr>>(
    program: impl AsRef<OsStr>,
    args: &[S],
    working_dir: Option<&Path>,
    env: &[(String, String)],
) -> Result<CommandResult> {
    let program = program.as_ref();
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.stdin(Stdio::null());

    debug!(
        "spawning {} {} (in {})",
        program.to_string_lossy(),
        display_args(args),
        working_dir
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| ".".to_string())
    );

    // `output()` reads stdout and stderr concurrently, so a chatty child
    // cannot fill one pipe while we block on the other.
    let output = cmd.output()?;
    let result = CommandResult {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    debug!("{} exited with {}", program.to_string_lossy(), result.status);
    Ok(result)
}

/// Whether git would read `value` as an option instead of an operand.
pub fn is_option_like(value: &str) -> bool {
    value.starts_with('-')
}

/// Space-joined rendering of an argument list, for logs and error messages.
pub fn display_args<S: AsRef<OsStr>>(args: &[S]) -> String {
    args.iter()
        .map(|a| a.as_ref().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
