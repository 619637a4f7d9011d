// tests/property/traverse_test.rs

//! Property-based tests for full-path traversal
//! Tests that named and plain traversal agree and that resolved paths are well formed.

use jsontraverse::core::{TraverseOptions, traverse_named, traverse_values};
use proptest::prelude::*;
use serde_json::{Value, json};

fn document(groups: &[Vec<i64>]) -> Value {
    let items: Vec<Value> = groups
        .iter()
        .enumerate()
        .map(|(id, values)| json!({"id": id, "values": values}))
        .collect();
    json!({"items": items})
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        max_shrink_iters: 500,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_named_and_plain_agree(
        groups in prop::collection::vec(prop::collection::vec(any::<i64>(), 0..6), 0..8),
        outer in "(-?[0-9])?:(-?[0-9])?",
        inner in "(-?[0-9])?:(-?[0-9])?"
    ) {
        let root = document(&groups);
        let options = TraverseOptions::default();
        let path = format!("items/{outer}/values/{inner}");

        let named = traverse_named(&root, &path, &options).unwrap();
        let plain = traverse_values(&root, &path, &options).unwrap();
        prop_assert_eq!(named.values().copied().collect::<Vec<_>>(), plain);
    }

    #[test]
    fn test_named_paths_resolve_back_to_their_values(
        groups in prop::collection::vec(prop::collection::vec(any::<i64>(), 0..6), 1..8)
    ) {
        let root = document(&groups);
        let options = TraverseOptions::new("/", false).unwrap();
        let named = traverse_named(&root, "items/:/values/:", &options).unwrap();

        let total: usize = groups.iter().map(Vec::len).sum();
        prop_assert_eq!(named.len(), total);
        for (path, value) in &named {
            prop_assert!(!path.starts_with('/') && !path.ends_with('/'));
            // Every resolved path is itself a literal path to the same value.
            let again = traverse_values(&root, path, &options).unwrap();
            prop_assert_eq!(again, vec![*value]);
        }
    }

    #[test]
    fn test_separator_choice_does_not_change_values(
        groups in prop::collection::vec(prop::collection::vec(any::<i64>(), 0..6), 0..8),
        separator in prop::sample::select(vec!["/", ".", "->", "|"])
    ) {
        let root = document(&groups);
        let slash = TraverseOptions::default();
        let other = TraverseOptions::new(separator, true).unwrap();

        let expected = traverse_values(&root, "items/:/id", &slash).unwrap();
        let path = ["items", ":", "id"].join(separator);
        prop_assert_eq!(traverse_values(&root, &path, &other).unwrap(), expected);
    }
}
