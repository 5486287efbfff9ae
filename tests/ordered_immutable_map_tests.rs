//! Unit tests for OrderedImmutableMap.
//!
//! The ordered variant shares every behaviour of ImmutableMap; these tests
//! focus on construction order, copy ordering and the variant name.

use frozenmap::map::{ImmutableMap, MutableMapping, OrderedImmutableMap};
use frozenmap::ordered_immutable_map;
use indexmap::IndexMap;
use rstest::rstest;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

fn keys<V>(map: &OrderedImmutableMap<&'static str, V>) -> Vec<&'static str> {
    map.keys().copied().collect()
}

fn entry_set(map: &OrderedImmutableMap<&'static str, i32>) -> HashSet<(&'static str, i32)> {
    map.iter().map(|(key, value)| (*key, *value)).collect()
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_init() {
    let map: OrderedImmutableMap<&str, i32> = OrderedImmutableMap::new();
    assert!(map.is_empty());
}

#[rstest]
fn test_init_with_pairs() {
    let map = ordered_immutable_map! { "a" => 0, "b" => 1 };
    assert_eq!(map, HashMap::from([("a", 0), ("b", 1)]));
}

#[rstest]
fn test_init_with_index_map_keeps_its_order() {
    let source = IndexMap::from([("z", 0), ("m", 1), ("a", 2)]);
    let map: OrderedImmutableMap<&str, i32> = source.into();
    assert_eq!(keys(&map), vec!["z", "m", "a"]);
}

#[rstest]
fn test_init_with_mapping_and_pairs() {
    let map: OrderedImmutableMap<&str, i32> = OrderedImmutableMap::from_sources([
        vec![("a", 0), ("b", 1)],
        vec![("b", 2), ("c", 3)],
    ]);

    assert_eq!(map, HashMap::from([("a", 0), ("b", 2), ("c", 3)]));
    assert_eq!(keys(&map), vec!["a", "b", "c"]);
}

#[rstest]
fn test_overwritten_key_keeps_first_position() {
    let map = ordered_immutable_map! { "a" => 0, "b" => 1, "a" => 2 };
    assert_eq!(keys(&map), vec!["a", "b"]);
    assert_eq!(map["a"], 2);
}

// =============================================================================
// Lookup and mutation
// =============================================================================

#[rstest]
fn test_getitem() {
    let map = ordered_immutable_map! { "key" => "value" };
    assert_eq!(map["key"], "value");
}

#[rstest]
#[should_panic(expected = "key not found in OrderedImmutableMap")]
fn test_getitem_missing_key_panics() {
    let map = ordered_immutable_map! { "key" => "value" };
    let _value = &map["other"];
}

#[rstest]
fn test_assignment_fails() {
    let mut map: OrderedImmutableMap<&str, &str> = OrderedImmutableMap::new();
    let error = map.set_item("key", "value").unwrap_err();

    assert_eq!(
        error.to_string(),
        "'OrderedImmutableMap' object does not support item assignment"
    );
}

// =============================================================================
// Copy
// =============================================================================

#[rstest]
fn test_copy() {
    let map = ordered_immutable_map! { "a" => 0, "b" => 1 };
    let copied = map.copy([]);

    assert_eq!(copied.variant_name(), "OrderedImmutableMap");
    assert_eq!(entry_set(&copied), entry_set(&map));
    assert_eq!(keys(&copied), keys(&map));
}

#[rstest]
fn test_copy_with_keys() {
    let map = ordered_immutable_map! { "a" => 0, "b" => 1 };
    let copied = map.copy([("b", 2), ("c", 3)]);

    assert_eq!(copied, HashMap::from([("a", 0), ("b", 2), ("c", 3)]));
    assert_eq!(keys(&copied), vec!["a", "b", "c"]);
    assert_eq!(map, HashMap::from([("a", 0), ("b", 1)]));
}

// =============================================================================
// Iteration
// =============================================================================

#[rstest]
fn test_iter() {
    let map: OrderedImmutableMap<&str, i32> = [("a", 0), ("c", 2), ("b", 1), ("d", 3)].into();
    let collected: Vec<_> = (&map).into_iter().map(|(key, _)| *key).collect();
    assert_eq!(collected, vec!["a", "c", "b", "d"]);
}

#[rstest]
fn test_values_follow_key_order() {
    let map = ordered_immutable_map! { "x" => 3, "y" => 1, "z" => 2 };
    let values: Vec<_> = map.values().copied().collect();
    assert_eq!(values, vec![3, 1, 2]);
}

#[rstest]
fn test_owned_into_iter_keeps_order() {
    let map = ordered_immutable_map! { "x" => 3, "y" => 1 };
    let pairs: Vec<_> = map.into_iter().collect();
    assert_eq!(pairs, vec![("x", 3), ("y", 1)]);
}

#[rstest]
fn test_len() {
    let map = ordered_immutable_map! { "a" => 0, "b" => 1 };
    assert_eq!(map.len(), 2);
}

// =============================================================================
// Formatting, equality and hashing
// =============================================================================

#[rstest]
fn test_repr() {
    let map = ordered_immutable_map! { "a" => 0, "b" => 1 };
    let rendered = format!("{map:?}");
    assert!(rendered.starts_with("<OrderedImmutableMap "));
    assert!(rendered.ends_with('>'));
    assert_eq!(rendered, "<OrderedImmutableMap {\"a\": 0, \"b\": 1}>");
}

#[rstest]
fn test_hash() {
    let map = ordered_immutable_map! { "a" => 0, "b" => 1 };
    assert_eq!(hash_of(&map), hash_of(&map.clone()));
}

#[rstest]
fn test_order_does_not_affect_equality_or_hash() {
    let forward = ordered_immutable_map! { "a" => 0, "b" => 1 };
    let backward = ordered_immutable_map! { "b" => 1, "a" => 0 };

    assert_eq!(forward, backward);
    assert_eq!(hash_of(&forward), hash_of(&backward));
    assert_ne!(keys(&forward), keys(&backward));
}

#[rstest]
fn test_ordered_and_unordered_variants_are_interchangeable_keys() {
    let unordered: ImmutableMap<&str, i32> = [("a", 0), ("b", 1)].into();
    let ordered = ordered_immutable_map! { "b" => 1, "a" => 0 };

    assert_eq!(ordered, unordered);
    assert_eq!(unordered, ordered);
    assert_eq!(ordered.fingerprint(), unordered.fingerprint());
}

#[rstest]
fn test_equality_against_index_map() {
    let map = ordered_immutable_map! { "a" => 0, "b" => 1 };
    assert_eq!(map, IndexMap::from([("b", 1), ("a", 0)]));
}
