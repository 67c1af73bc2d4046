//! Property-based tests for manifest parsing.
//!
//! These tests use proptest to generate manifests and verify that the
//! git/non-git split holds for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::manifest::{git_descriptors, parse, ManifestEntry};
    use proptest::prelude::*;

    fn rosinstall_item(kind: &str, name: &str) -> String {
        format!(
            "- {}:\n    local-name: '{}'\n    uri: https://example/{}\n    version: master\n",
            kind, name, name
        )
    }

    proptest! {
        /// Property: a manifest with no git entries yields no descriptors
        #[test]
        fn non_git_manifest_has_no_descriptors(
            items in prop::collection::vec(
                (prop::sample::select(vec!["svn", "hg", "bzr", "tar"]), "[a-z][a-z0-9_]{0,12}"),
                0..16,
            )
        ) {
            let yaml: String = items.iter().map(|(kind, name)| rosinstall_item(kind, name)).collect();
            let entries = parse(&yaml).unwrap();
            prop_assert!(git_descriptors(&entries).is_empty());
            prop_assert_eq!(entries.len(), items.len());
        }

        /// Property: every distinct git name comes back once, in order
        #[test]
        fn git_names_round_trip_in_order(
            names in prop::collection::btree_set("[a-z][a-z0-9_]{0,12}", 0..16)
        ) {
            let names: Vec<String> = names.into_iter().collect();
            let yaml: String = names.iter().map(|name| rosinstall_item("git", name)).collect();
            let entries = parse(&yaml).unwrap();
            let parsed: Vec<String> = git_descriptors(&entries)
                .iter()
                .map(|d| d.local_name.clone())
                .collect();
            prop_assert_eq!(parsed, names);
        }

        /// Property: repeating a name never yields two descriptors for it
        #[test]
        fn duplicate_names_collapse(name in "[a-z][a-z0-9_]{0,12}", copies in 1usize..5) {
            let yaml: String = (0..copies).map(|_| rosinstall_item("git", &name)).collect();
            let entries = parse(&yaml).unwrap();
            prop_assert_eq!(git_descriptors(&entries).len(), 1);
            let skipped = entries
                .iter()
                .filter(|e| matches!(e, ManifestEntry::Skipped { .. }))
                .count();
            prop_assert_eq!(skipped, copies - 1);
        }
    }
}
