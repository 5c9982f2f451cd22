//! Shared test utilities for integration and E2E tests.
//!
//! Every fixture drives a real `git` binary, so tests using it are gated
//! behind the `integration-tests` feature.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! #[cfg_attr(not(feature = "integration-tests"), ignore)]
//! fn test_example() {
//!     let repo = TestRepo::init().with_commit("abc", "one\n", "first");
//!     assert!(repo.client().is_repository(repo.path()));
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

use gitscope::config::Config;
use gitscope::repository::GitClient;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git_config, git_env, TestRepo};
}

/// Identity and isolation settings every child git process needs in tests.
pub fn git_env() -> Vec<(&'static str, &'static str)> {
    vec![
        ("GIT_AUTHOR_NAME", "gitscope-test"),
        ("GIT_AUTHOR_EMAIL", "test@example.com"),
        ("GIT_COMMITTER_NAME", "gitscope-test"),
        ("GIT_COMMITTER_EMAIL", "test@example.com"),
        ("GIT_CONFIG_NOSYSTEM", "1"),
    ]
}

/// A client configuration carrying [`git_env`].
pub fn git_config() -> Config {
    let mut config = Config::default();
    for (key, value) in git_env() {
        config.env.insert(key.to_string(), value.to_string());
    }
    config
}

/// A scratch directory holding a freshly initialised repository.
///
/// The repository lives in `<temp>/repo` so tests can create siblings
/// (clones, non-repository directories) under the same root.
pub struct TestRepo {
    temp_dir: assert_fs::TempDir,
    repo: PathBuf,
    client: GitClient,
}

impl TestRepo {
    /// Initialise an empty repository.
    pub fn init() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        let repo = temp_dir.path().join("repo");
        let client = GitClient::new(&git_config());
        client.init(&repo).expect("Failed to initialise repository");
        Self {
            temp_dir,
            repo,
            client,
        }
    }

    /// Write `name`, stage it and commit it.
    pub fn with_commit(self, name: &str, content: &str, message: &str) -> Self {
        self.commit_file(name, content, message);
        self
    }

    /// Write `name`, stage it and commit it.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) {
        self.write(name, content);
        self.client
            .add(self.path(), name)
            .expect("Failed to stage file");
        self.client
            .commit(self.path(), message)
            .expect("Failed to commit");
    }

    /// Overwrite `name` inside the working copy without staging it.
    pub fn write(&self, name: &str, content: &str) {
        self.temp_dir
            .child("repo")
            .child(name)
            .write_str(content)
            .expect("Failed to write file");
    }

    /// The working copy.
    pub fn path(&self) -> &Path {
        &self.repo
    }

    /// A sibling path under the same scratch root, not created.
    pub fn sibling(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// The scratch root.
    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn client(&self) -> &GitClient {
        &self.client
    }

    /// A `gitscope` command running in the scratch root with an isolated
    /// configuration file and the test identity in its environment.
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        let config = self.temp_dir.child("gitscope.yaml");
        config
            .write_str("mode: direct\n")
            .expect("Failed to write config file");

        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gitscope");
        cmd.current_dir(self.temp_dir.path())
            .env("GITSCOPE_CONFIG", config.path())
            .env_remove("GITSCOPE_GIT")
            .env_remove("RUST_LOG")
            .envs(git_env());
        cmd
    }
}
