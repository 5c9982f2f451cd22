//! # Scoped Execution
//!
//! [`run_scoped`] changes the process working directory into a target
//! directory, runs one unit of work there, and always changes back.
//!
//! The working directory is process-global state, so the whole
//! change → operate → restore sequence runs under a process-wide lock.
//! Callers that can pass an explicit directory to the child process instead
//! (see [`crate::runner::DirectRunner`]) never need to come through here.
//!
//! Restoration is tied to a drop guard: it happens when the operation
//! returns normally, when it returns an error, and when it panics.
//!
//! Calls nest. A `run_scoped` issued from inside another one on the same
//! thread already holds the lock, so it skips locking and restores to the
//! enclosing call's directory.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use log::{debug, warn};

use crate::error::{Error, Result};

static CWD_LOCK: Mutex<()> = Mutex::new(());

thread_local! {
    // Number of `run_scoped` frames active on this thread.
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Run `operation` with the process working directory set to `directory`.
///
/// Fails with [`Error::InvalidLocation`] before running anything when
/// `directory` does not exist or is not a directory. Otherwise the value
/// returned by `operation` is passed back untouched, so an operation that
/// returns a `Result` keeps its own error.
///
/// Once `operation` has run its value is always returned. A failure to switch
/// back afterwards is logged at `warn` level and leaves the process in
/// `directory`.
///
/// # Errors
///
/// `InvalidLocation` for a bad target, `Io` when the current directory cannot
/// be read or entered.
pub fn run_scoped<R, F>(directory: &Path, operation: F) -> Result<R>
where
    F: FnOnce() -> R,
{
    if !directory.is_dir() {
        return Err(Error::InvalidLocation {
            path: directory.to_path_buf(),
        });
    }

    let _lock = if depth() == 0 { Some(acquire()) } else { None };
    let _depth = DepthGuard::enter();
    let guard = DirGuard::enter(directory)?;
    let value = operation();
    guard.restore();
    Ok(value)
}

fn depth() -> usize {
    DEPTH.with(|d| d.get())
}

struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        DEPTH.with(|d| d.set(d.get() + 1));
        DepthGuard
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

fn acquire() -> MutexGuard<'static, ()> {
    // A panic inside a previous operation poisons the lock, but the guard
    // already put the directory back, so the protected state is consistent.
    CWD_LOCK.lock().unwrap_or_else(|poisoned| {
        debug!("recovering poisoned working-directory lock");
        poisoned.into_inner()
    })
}

/// Restores the recorded working directory when dropped.
struct DirGuard {
    original: Option<PathBuf>,
}

impl DirGuard {
    fn enter(directory: &Path) -> Result<Self> {
        let original = std::env::current_dir()?;
        std::env::set_current_dir(directory).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::InvalidLocation {
                path: directory.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;
        Ok(Self {
            original: Some(original),
        })
    }

    fn restore(mut self) {
        self.switch_back();
    }

    fn switch_back(&mut self) {
        if let Some(original) = self.original.take() {
            if let Err(e) = std::env::set_current_dir(&original) {
                warn!(
                    "failed to restore working directory {}: {}",
                    original.display(),
                    e
                );
            }
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        self.switch_back();
    }
}
