// tests/property/resolver_test.rs

//! Property-based tests for single-segment resolution

use jsontraverse::core::{ChildKey, Resolved, resolve_mapping, resolve_sequence};
use proptest::prelude::*;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

fn to_object(entries: &BTreeMap<String, i64>) -> Value {
    Value::Object(
        entries
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(*v)))
            .collect::<Map<String, Value>>(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        max_shrink_iters: 500,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_literal_key_selects_every_key_it_prefixes(
        entries in prop::collection::btree_map("[a-z]{1,6}", any::<i64>(), 1..20),
        pick in any::<prop::sample::Index>()
    ) {
        let node = to_object(&entries);
        let keys: Vec<&String> = entries.keys().collect();
        let key = keys[pick.index(keys.len())];

        let Resolved::Named(found) = resolve_mapping(&node, key, false, true).unwrap() else {
            panic!("expected named matches");
        };
        let expected: Vec<ChildKey> = entries
            .keys()
            .filter(|k| k.starts_with(key.as_str()))
            .map(|k| ChildKey::Key(k.clone()))
            .collect();
        prop_assert_eq!(found.keys().cloned().collect::<Vec<_>>(), expected);
        prop_assert_eq!(found[&ChildKey::Key(key.clone())], &node[key.as_str()]);
    }

    #[test]
    fn test_literal_key_without_prefix_siblings_is_exact(
        entries in prop::collection::btree_map("[a-z]{3}", any::<i64>(), 1..20),
        pick in any::<prop::sample::Index>()
    ) {
        // Equal-length keys never prefix one another.
        let node = to_object(&entries);
        let keys: Vec<&String> = entries.keys().collect();
        let key = keys[pick.index(keys.len())];

        let found = resolve_mapping(&node, key, false, true).unwrap();
        let expected = Resolved::Named(
            [(ChildKey::Key(key.clone()), &node[key.as_str()])].into_iter().collect(),
        );
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn test_case_folding_only_adds_matches(
        entries in prop::collection::btree_map("[a-cA-C]{1,4}", any::<i64>(), 1..20),
        pattern in "[a-cA-C]{1,2}"
    ) {
        let node = to_object(&entries);
        let strict = resolve_mapping(&node, &pattern, false, false).unwrap().into_values();
        let folded = resolve_mapping(&node, &pattern, true, false).unwrap().into_values();
        prop_assert!(strict.len() <= folded.len());
        prop_assert!(strict.iter().all(|v| folded.contains(v)));
    }

    #[test]
    fn test_full_slice_is_identity(items in prop::collection::vec(any::<i64>(), 0..50)) {
        let node = Value::from(items.clone());
        let found = resolve_sequence(&node, ":", false).unwrap().into_values();
        let found: Vec<i64> = found.into_iter().filter_map(Value::as_i64).collect();
        prop_assert_eq!(found, items);
    }

    #[test]
    fn test_bare_index_named_and_plain(
        items in prop::collection::vec(any::<i64>(), 1..50),
        pick in any::<prop::sample::Index>()
    ) {
        let node = Value::from(items.clone());
        let i = pick.index(items.len());

        let plain = resolve_sequence(&node, &i.to_string(), false).unwrap();
        prop_assert_eq!(plain, Resolved::Values(vec![&node[i]]));

        let named = resolve_sequence(&node, &i.to_string(), true).unwrap();
        let expected = Resolved::Named([(ChildKey::Index(i), &node[i])].into_iter().collect());
        prop_assert_eq!(named, expected);
    }
}
