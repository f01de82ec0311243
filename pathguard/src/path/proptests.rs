//! Property-based tests for path handling.
//!
//! Note: The normalize module already has light property tests. This module
//! runs heavier grids over absolute paths and separator conventions.

use super::normalize::{normalize, resolve};
use super::types::to_forward_slashes;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

fn components_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(path_component_strategy(), 1..8)
}

/// A tempdir with a few real subdirectories so paths mix existing and
/// missing segments.
fn seeded_root() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
    fs::create_dir_all(dir.path().join("x")).unwrap();
    dir
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // resolve(resolve(p)) == resolve(p) for absolute paths
    #[test]
    fn resolve_idempotent(parts in components_strategy(), trailing in any::<bool>()) {
        let root = seeded_root();
        let mut raw = format!("{}/{}", to_forward_slashes(root.path()), parts.join("/"));
        if trailing {
            raw.push('/');
        }

        let once = resolve(&raw).unwrap();
        let twice = resolve(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    // Relative paths land under the real content directory
    #[test]
    fn relative_paths_stay_under_content(parts in components_strategy()) {
        let root = seeded_root();
        let content = to_forward_slashes(&fs::canonicalize(root.path()).unwrap());
        let normalized = normalize(&parts.join("/"), root.path()).unwrap();
        let expected_prefix = format!("{content}/");
        prop_assert!(normalized.as_str().starts_with(&expected_prefix));
    }

    // Backslash and forward-slash spellings normalize identically
    #[test]
    fn separator_convention_irrelevant(parts in components_strategy()) {
        let root = seeded_root();
        let forward = normalize(&parts.join("/"), root.path()).unwrap();
        let backward = normalize(&parts.join("\\"), root.path()).unwrap();
        prop_assert_eq!(forward, backward);
    }

    // `name/..` cancels out wherever it appears in the missing tail
    #[test]
    fn parent_segment_cancels_name(parts in components_strategy(), extra in path_component_strategy()) {
        let root = seeded_root();
        let plain = normalize(&parts.join("/"), root.path()).unwrap();
        let detour = normalize(&format!("{}/{extra}/..", parts.join("/")), root.path()).unwrap();
        prop_assert_eq!(plain, detour);
    }
}
