//! Property-based tests for the path algebra.

use super::algebra::{find_outermost_entity, find_parent_folder};
use proptest::prelude::*;
use std::path::PathBuf;

fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,10}"
}

/// A source root plus a nested target that mirrors it on disk.
fn mirrored_pair_strategy() -> impl Strategy<Value = (PathBuf, Vec<String>)> {
    (
        prop::collection::vec(segment_strategy(), 1..4),
        prop::collection::vec(segment_strategy(), 1..6),
    )
        .prop_map(|(root, target)| {
            let mut path = PathBuf::from("/");
            for part in root {
                path.push(part);
            }
            (path, target)
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // The outermost target never contains a separator and is the first segment.
    #[test]
    fn outermost_target_is_first_segment((root, target) in mirrored_pair_strategy()) {
        let joined = target.join("/");
        let source = root.join(&joined);
        let (outer, _) = find_outermost_entity(&joined, &source);
        prop_assert!(!outer.contains('/'));
        prop_assert_eq!(&outer, &target[0]);
    }

    // Source and target are truncated by the same depth.
    #[test]
    fn outermost_source_is_root_plus_first_segment((root, target) in mirrored_pair_strategy()) {
        let joined = target.join("/");
        let source = root.join(&joined);
        let (_, outer_source) = find_outermost_entity(&joined, &source);
        prop_assert_eq!(outer_source, root.join(&target[0]));
    }

    // Mirrored layouts always yield the root as the parent folder.
    #[test]
    fn parent_folder_of_mirrored_layout_is_root((root, target) in mirrored_pair_strategy()) {
        let joined = target.join("/");
        let source = root.join(&joined);
        prop_assert_eq!(find_parent_folder(&joined, &source).unwrap(), root);
    }

    // Renaming the top-level directory on disk always fails.
    #[test]
    fn renamed_top_level_is_rejected((root, target) in mirrored_pair_strategy()) {
        let joined = target.join("/");
        let mut on_disk = target.clone();
        on_disk[0] = format!("{}_renamed", on_disk[0]);
        let source = root.join(on_disk.join("/"));
        prop_assert!(find_parent_folder(&joined, &source).is_err());
    }
}
