//! # gitscope
//!
//! A thin host-side layer over the `git` command-line tool. Repo-sync agents
//! and similar tooling use it to probe, mutate and compare working copies
//! without shelling out or parsing tool output themselves.
//!
//! ## Quick Example
//!
//! ```no_run
//! use gitscope::config::Config;
//! use gitscope::repository::GitClient;
//! use std::path::Path;
//!
//! let client = GitClient::new(&Config::default());
//! let repo = Path::new("/srv/checkouts/service");
//!
//! if client.is_repository(repo) {
//!     let remotes = client.list_remotes(repo).unwrap();
//!     println!("remotes: {:?}", remotes);
//!
//!     // Positive: HEAD is ahead of origin/main. Negative: behind.
//!     let distance = client.compare("HEAD", "origin/main", repo).unwrap();
//!     println!("distance: {}", distance);
//! }
//! ```
//!
//! ## Core Concepts
//!
//! - **Execution (`exec`)**: spawns the tool, drains stdout and stderr, and
//!   returns a `CommandResult`. Exit status is data, not an error.
//! - **Scoped execution (`scope`)**: runs work with the process working
//!   directory switched to a target and always switched back, serialised by a
//!   process-wide lock.
//! - **Runners (`runner`)**: the `CommandRunner` trait, with a runner that
//!   passes the directory to the child and one that goes through `scope`.
//! - **Parsing (`parse`)**: every assumption about tool output format.
//! - **Comparison (`compare`)**: the signed ahead/behind distance.
//! - **Client (`repository`)**: probes and actions on working copies.
//! - **Configuration (`config`)**: which binary to run and how.

pub mod compare;
pub mod config;
pub mod error;
pub mod exec;
pub mod parse;
pub mod repository;
pub mod runner;
pub mod scope;

#[cfg(test)]
mod parse_proptest;
