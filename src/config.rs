//! # Configuration
//!
//! Optional YAML configuration for how `gitscope` invokes the `git` binary.
//! Every field has a default, so an empty document (or no file at all) is a
//! valid configuration.
//!
//! ```yaml
//! binary: /usr/bin/git
//! mode: scoped
//! disable_prompt: true
//! env:
//!   GIT_AUTHOR_NAME: sync-bot
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "GITSCOPE_CONFIG";

/// How the working directory of a command is established.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Pass the directory to the child process; process state is untouched.
    #[default]
    Direct,
    /// Change the process working directory around each command, under the
    /// process-wide lock.
    Scoped,
}

/// Settings for invoking the external `git` binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Program name resolved through `PATH`, or an absolute path.
    pub binary: PathBuf,
    pub mode: ExecutionMode,
    /// Set `GIT_TERMINAL_PROMPT=0` on every child unless `env` overrides it.
    pub disable_prompt: bool,
    /// Extra environment applied to every child process.
    pub env: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("git"),
            mode: ExecutionMode::Direct,
            disable_prompt: true,
            env: BTreeMap::new(),
        }
    }
}

impl Config {
    /// The environment every child process receives, in a stable order.
    pub fn child_env(&self) -> Vec<(String, String)> {
        let mut env: Vec<(String, String)> = Vec::with_capacity(self.env.len() + 1);
        if self.disable_prompt && !self.env.contains_key("GIT_TERMINAL_PROMPT") {
            env.push(("GIT_TERMINAL_PROMPT".to_string(), "0".to_string()));
        }
        env.extend(self.env.iter().map(|(k, v)| (k.clone(), v.clone())));
        env
    }
}

/// Parse a configuration document.
pub fn parse(yaml: &str) -> Result<Config> {
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
        let message = e.to_string();
        let hint = if message.contains("unknown field") {
            Some("Valid keys are: binary, mode, disable_prompt, env".to_string())
        } else if message.contains("unknown variant") {
            Some("mode must be either `direct` or `scoped`".to_string())
        } else {
            None
        };
        Error::ConfigParse { message, hint }
    })?;

    if config.binary.as_os_str().is_empty() {
        return Err(Error::ConfigParse {
            message: "binary must not be empty".to_string(),
            hint: Some("Use `git`, or an absolute path such as /usr/bin/git".to_string()),
        });
    }

    Ok(config)
}

/// Read and parse a configuration file.
pub fn from_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

/// Default configuration file location, `<config dir>/gitscope/config.yaml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gitscope").join("config.yaml"))
}

/// Resolve the configuration the way the CLI does.
///
/// An explicit path must exist. Without one, the default location is used
/// when present, and built-in defaults otherwise.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return from_file(path);
    }

    match default_path() {
        Some(path) if path.is_file() => {
            log::debug!("loading configuration from {}", path.display());
            from_file(&path)
        }
        _ => Ok(Config::default()),
    }
}
