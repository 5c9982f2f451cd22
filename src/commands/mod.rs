//! # CLI Command Implementations
//!
//! Each command group lives in its own file:
//!
//! - `probe`: read-only questions about a working copy.
//! - `compare`: commit distances.
//! - `sync`: clone, init, stage, commit, fetch, pull and update.
//!
//! Every module defines `clap` argument structs and functions taking the
//! parsed arguments plus the shared `GitClient`. Library errors are wrapped
//! with `anyhow` context naming the path involved.

pub mod compare;
pub mod probe;
pub mod sync;
