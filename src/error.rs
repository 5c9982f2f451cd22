//! # Error Handling
//!
//! This module defines the centralized error type for `gitscope`. It uses the
//! `thiserror` library to create an `Error` enum covering every failure a
//! caller can observe, with the raw diagnostic text of the `git` tool attached
//! wherever a subprocess was involved.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failure modes. Precondition failures
//!   (`InvalidLocation`, `NotARepository`, `NoRemoteConfigured`) are raised
//!   before any subprocess is spawned. Tool failures (`OperationFailed`,
//!   `ComparisonFailed`) carry the tool's stderr.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! No operation retries on failure; every error is terminal for that call.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gitscope operations
#[derive(Error, Debug)]
pub enum Error {
    /// The target path does not exist or is not a directory.
    #[error("Invalid location: {} is not an existing directory", path.display())]
    InvalidLocation { path: PathBuf },

    /// An operation that requires a repository was called outside one.
    #[error("Not a repository: {}", path.display())]
    NotARepository { path: PathBuf },

    /// An update was requested for a repository with zero remotes.
    #[error("No remote configured for {}", path.display())]
    NoRemoteConfigured { path: PathBuf },

    /// A mutating or query command exited non-zero (or could not be run).
    #[error("Git command failed: {command} - {diagnostic}")]
    OperationFailed { command: String, diagnostic: String },

    /// One of the two directional `rev-list` queries failed.
    #[error("Comparison of {lhs} with {rhs} failed: {diagnostic}")]
    ComparisonFailed {
        lhs: String,
        rhs: String,
        diagnostic: String,
    },

    /// The configuration file could not be interpreted.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Builds an `OperationFailed` from a command line and the tool's output.
    ///
    /// The diagnostic is stderr when it has content, stdout otherwise.
    pub fn operation_failed(command: impl Into<String>, stderr: &str, stdout: &str) -> Self {
        Error::OperationFailed {
            command: command.into(),
            diagnostic: pick_diagnostic(stderr, stdout),
        }
    }
}

pub(crate) fn pick_diagnostic(stderr: &str, stdout: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        stdout.trim().to_string()
    } else {
        stderr.to_string()
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
