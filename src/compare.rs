//! # Commit Distance
//!
//! Answers "how far is `lhs` ahead of or behind `rhs`" with one signed
//! integer, using at most two `git rev-list` queries.
//!
//! The check is one-sided: commits reachable from `lhs` but not `rhs` are
//! counted first, and if there are any that count is returned without looking
//! the other way. Only when `lhs` has nothing of its own is the reverse set
//! counted. For two diverged references the `rhs`-only count is therefore
//! never reported.
//!
//! - positive: `lhs` is ahead by that many commits
//! - negative: `lhs` is behind by that many commits
//! - zero: neither side has commits the other lacks

use std::fmt;
use std::path::Path;

use log::debug;

use crate::error::{pick_diagnostic, Error, Result};
use crate::exec::is_option_like;
use crate::parse;
use crate::runner::CommandRunner;

/// Signed commit distance of `lhs` relative to `rhs` at `location`.
///
/// # Errors
///
/// `InvalidLocation` when `location` is not a directory, `ComparisonFailed`
/// when either reference starts with `-` (nothing is spawned) or when either
/// `rev-list` query cannot be run or exits non-zero.
pub fn compare(runner: &dyn CommandRunner, lhs: &str, rhs: &str, location: &Path) -> Result<i64> {
    if let Some(reference) = [lhs, rhs].into_iter().find(|r| is_option_like(r)) {
        return Err(Error::ComparisonFailed {
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
            diagnostic: format!("reference '{}' must not start with '-'", reference),
        });
    }

    let left_only = count_exclusive(runner, lhs, rhs, location)?;
    if left_only > 0 {
        debug!("{} is ahead of {} by {}", lhs, rhs, left_only);
        return Ok(left_only);
    }

    let right_only = count_exclusive(runner, rhs, lhs, location).map_err(|e| match e {
        // Keep the caller's orientation in the error.
        Error::ComparisonFailed { diagnostic, .. } => Error::ComparisonFailed {
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
            diagnostic,
        },
        other => other,
    })?;
    if right_only > 0 {
        debug!("{} is behind {} by {}", lhs, rhs, right_only);
        return Ok(-right_only);
    }

    Ok(0)
}

/// Number of commits reachable from `from` but not from `exclude`.
fn count_exclusive(
    runner: &dyn CommandRunner,
    from: &str,
    exclude: &str,
    location: &Path,
) -> Result<i64> {
    let range = format!("{}..{}", exclude, from);
    let failed = |diagnostic: String| Error::ComparisonFailed {
        lhs: from.to_string(),
        rhs: exclude.to_string(),
        diagnostic,
    };

    let result = match runner.run(location, &["rev-list", range.as_str()]) {
        Ok(result) => result,
        Err(e @ Error::InvalidLocation { .. }) => return Err(e),
        Err(e) => return Err(failed(e.to_string())),
    };

    if !result.success() {
        return Err(failed(pick_diagnostic(&result.stderr, &result.stdout)));
    }

    // rev-list output is bounded by repository history; it fits in i64.
    Ok(parse::count_revisions(&result.stdout) as i64)
}

/// Human-facing view of a signed distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    Ahead(u64),
    Behind(u64),
    Even,
}

impl From<i64> for Distance {
    fn from(value: i64) -> Self {
        match value {
            0 => Distance::Even,
            n if n > 0 => Distance::Ahead(n.unsigned_abs()),
            n => Distance::Behind(n.unsigned_abs()),
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Ahead(n) => write!(f, "ahead by {}", n),
            Distance::Behind(n) => write!(f, "behind by {}", n),
            Distance::Even => write!(f, "even"),
        }
    }
}
