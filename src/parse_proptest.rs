//! Property-based tests for the tool output parsers.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::parse::{
        count_revisions, parse_branch_ref, parse_remotes, porcelain_has_modification,
    };
    use proptest::prelude::*;

    // ============================================================================
    // parse_remotes property tests
    // ============================================================================

    proptest! {
        /// Property: every parsed remote is non-empty and already trimmed
        #[test]
        fn parse_remotes_yields_trimmed_non_empty(input in ".*(\n.*){0,8}") {
            for remote in parse_remotes(&input) {
                prop_assert!(!remote.is_empty());
                prop_assert_eq!(remote.trim(), remote.as_str());
            }
        }

        /// Property: listed names come back in the same order
        #[test]
        fn parse_remotes_preserves_order(names in prop::collection::vec("[a-z][a-z0-9_-]{0,12}", 0..8)) {
            let output = names.join("\n");
            prop_assert_eq!(parse_remotes(&output), names);
        }
    }

    // ============================================================================
    // parse_branch_ref property tests
    // ============================================================================

    proptest! {
        /// Property: any single-segment name round-trips through refs/heads/
        #[test]
        fn parse_branch_ref_accepts_simple_names(name in "[A-Za-z0-9._-]{1,30}") {
            let output = format!("refs/heads/{}\n", name);
            prop_assert_eq!(parse_branch_ref(&output), Some(name));
        }

        /// Property: names containing a slash are never returned
        #[test]
        fn parse_branch_ref_rejects_nested_names(
            head in "[a-z]{1,10}",
            tail in "[a-z]{1,10}",
        ) {
            let output = format!("refs/heads/{}/{}", head, tail);
            prop_assert_eq!(parse_branch_ref(&output), None);
        }

        /// Property: a returned name never contains a slash
        #[test]
        fn parse_branch_ref_result_has_no_slash(input in ".*") {
            if let Some(name) = parse_branch_ref(&input) {
                prop_assert!(!name.contains('/'));
                prop_assert!(!name.is_empty());
            }
        }
    }

    // ============================================================================
    // porcelain / rev-list property tests
    // ============================================================================

    proptest! {
        /// Property: untracked-only listings are never reported as modified
        #[test]
        fn untracked_listing_is_not_modified(paths in prop::collection::vec("[A-Za-z0-9_.]{1,20}", 0..10)) {
            let output: String = paths.iter().map(|p| format!("?? {}\n", p)).collect();
            prop_assert!(!porcelain_has_modification(&output));
        }

        /// Property: adding one modified line always flips the answer
        #[test]
        fn one_modified_line_is_enough(
            paths in prop::collection::vec("[A-Za-z0-9_.]{1,20}", 0..10),
            position in 0usize..10,
        ) {
            let mut lines: Vec<String> = paths.iter().map(|p| format!("?? {}", p)).collect();
            let at = position.min(lines.len());
            lines.insert(at, " M changed.txt".to_string());
            prop_assert!(porcelain_has_modification(&lines.join("\n")));
        }

        /// Property: count_revisions counts exactly the listed hashes
        #[test]
        fn count_revisions_matches_line_count(hashes in prop::collection::vec("[0-9a-f]{40}", 0..50)) {
            let mut output = hashes.join("\n");
            if !hashes.is_empty() {
                output.push('\n');
            }
            prop_assert_eq!(count_revisions(&output), hashes.len());
        }
    }
}
