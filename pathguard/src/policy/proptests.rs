//! Property-based tests for the access policy checks.

use super::{is_forbidden, is_within_allowed_roots, AllowedRoots, SystemRootSet};
use proptest::prelude::*;
use std::path::Path;

fn absolute_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9_-]{1,12}", 1..6).prop_map(|parts| format!("/{}", parts.join("/")))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // An empty allowlist admits every path
    #[test]
    fn empty_allowlist_allows_all(path in absolute_path_strategy()) {
        prop_assert!(is_within_allowed_roots(&path, &AllowedRoots::default()));
    }

    // Letter case never changes the allowlist verdict
    #[test]
    fn allowlist_case_insensitive(parts in prop::collection::vec("[a-zA-Z0-9_-]{1,12}", 1..4)) {
        let dir = tempfile::tempdir().unwrap();
        let allowed = AllowedRoots::new(vec![dir.path().to_path_buf()]);
        let base = crate::path::canonicalize::real_path_string(dir.path()).unwrap();
        let candidate = format!("{base}/{}", parts.join("/"));

        prop_assert!(is_within_allowed_roots(&candidate.to_uppercase(), &allowed));
        prop_assert!(is_within_allowed_roots(&candidate.to_lowercase(), &allowed));
    }

    // A member is forbidden, a child of a member is not
    #[test]
    fn forbidden_is_exact(root in absolute_path_strategy(), child in "[a-z0-9]{1,12}") {
        let roots = SystemRootSet::from_paths([Path::new(&root)]);
        let member = roots.iter().next().unwrap().to_string();

        prop_assert!(is_forbidden(&member, &roots));
        prop_assert!(is_forbidden(&format!("{member}/"), &roots));
        prop_assert!(!is_forbidden(&format!("{member}/{child}"), &roots));
    }
}
