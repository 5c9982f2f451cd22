//! # Compare Commands
//!
//! `compare` prints the signed commit distance between two references and
//! `upstream` does the same for the current branch against its upstream.
//!
//! Plain output is the signed integer followed by a phrase, for example
//! `-2 (behind by 2)`. With `--json` a single object is printed instead.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use gitscope::compare::Distance;
use gitscope::repository::GitClient;

/// Signed commit distance between two references
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Reference whose position is reported.
    #[arg(value_name = "LHS")]
    pub lhs: String,

    /// Reference it is measured against.
    #[arg(value_name = "RHS")]
    pub rhs: String,

    /// Directory of the working copy.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub path: PathBuf,

    /// Print a JSON object instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Distance of the current branch from its upstream
#[derive(Args, Debug)]
pub struct UpstreamArgs {
    /// Directory of the working copy.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub path: PathBuf,

    /// Print a JSON object instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Machine-readable form of one comparison.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Report {
    pub lhs: String,
    pub rhs: String,
    pub distance: i64,
    pub summary: String,
}

impl Report {
    fn new(lhs: &str, rhs: &str, distance: i64) -> Self {
        Self {
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
            distance,
            summary: Distance::from(distance).to_string(),
        }
    }

    fn render(&self, json: bool) -> Result<String> {
        if json {
            Ok(serde_json::to_string(self)?)
        } else {
            Ok(format!("{} ({})", self.distance, self.summary))
        }
    }
}

pub fn execute(args: CompareArgs, client: &GitClient) -> Result<()> {
    let distance = client
        .compare(&args.lhs, &args.rhs, &args.path)
        .with_context(|| format!("Failed to compare {} with {}", args.lhs, args.rhs))?;

    println!("{}", Report::new(&args.lhs, &args.rhs, distance).render(args.json)?);
    Ok(())
}

pub fn upstream(args: UpstreamArgs, client: &GitClient) -> Result<()> {
    let outcome = client.compare_with_upstream(&args.path).with_context(|| {
        format!(
            "Failed to compare the current branch of {} with its upstream",
            args.path.display()
        )
    })?;

    let report = Report::new(&outcome.branch, &outcome.upstream, outcome.distance);
    println!("{}", report.render(args.json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text() {
        let report = Report::new("HEAD", "origin/main", -2);
        assert_eq!(report.render(false).unwrap(), "-2 (behind by 2)");
    }

    #[test]
    fn test_render_json() {
        let report = Report::new("a", "b", 3);
        let value: serde_json::Value = serde_json::from_str(&report.render(true).unwrap()).unwrap();
        assert_eq!(value["distance"], 3);
        assert_eq!(value["summary"], "ahead by 3");
        assert_eq!(value["lhs"], "a");
    }
}
