//! # Tool Output Parsing
//!
//! Every assumption this crate makes about the text `git` prints lives here,
//! behind small pure functions. They are tied to the tool's output format, so
//! keeping them apart from the control flow lets them be revalidated against
//! a new `git` release on their own.

/// Prefix of a local branch in the output of `symbolic-ref HEAD`.
pub const LOCAL_BRANCH_PREFIX: &str = "refs/heads";

/// Substring of a porcelain status flag that marks a modified entry.
pub const MODIFIED_MARKER: &str = "M";

/// Remote names from the output of `git remote`, in the order listed.
///
/// Lines are trimmed and empty lines dropped.
pub fn parse_remotes(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Branch name from the output of `git symbolic-ref HEAD`.
///
/// Only `refs/heads/<name>` with exactly three `/`-separated segments is
/// accepted. Branch names that themselves contain `/` therefore resolve to
/// `None`, as does anything that is not a local branch.
pub fn parse_branch_ref(output: &str) -> Option<String> {
    let reference = output.trim();
    if !reference.starts_with(LOCAL_BRANCH_PREFIX) {
        return None;
    }

    let segments: Vec<&str> = reference.split('/').collect();
    match segments.as_slice() {
        ["refs", "heads", name] if !name.is_empty() => Some((*name).to_string()),
        _ => None,
    }
}

/// Upstream name from `git rev-parse --abbrev-ref --symbolic-full-name <b>@{u}`.
pub fn parse_upstream(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Whether a porcelain status listing reports any modified entry.
///
/// Each line is split on whitespace and only its first token, the status
/// flags, is inspected. Index and worktree positions are not told apart.
pub fn porcelain_has_modification(output: &str) -> bool {
    output.lines().any(|line| {
        line.split_whitespace()
            .next()
            .is_some_and(|flags| flags.contains(MODIFIED_MARKER))
    })
}

/// Number of commits listed by `git rev-list`.
pub fn count_revisions(output: &str) -> usize {
    output.lines().filter(|line| !line.trim().is_empty()).count()
}
