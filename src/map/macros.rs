//! Literal syntax for immutable maps.

/// Creates an [`ImmutableMap`](crate::map::ImmutableMap) from `key => value` pairs.
///
/// Later pairs override earlier ones with the same key.
///
/// # Examples
///
/// ```rust
/// use frozenmap::immutable_map;
///
/// let map = immutable_map! { "a" => 0, "b" => 1, "a" => 2 };
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get("a"), Some(&2));
///
/// let empty: frozenmap::map::ImmutableMap<&str, i32> = immutable_map! {};
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! immutable_map {
    () => {
        <$crate::map::ImmutableMap<_, _>>::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {
        <$crate::map::ImmutableMap<_, _>>::from([$(($key, $value)),+])
    };
}

/// Creates an [`OrderedImmutableMap`](crate::map::OrderedImmutableMap) from
/// `key => value` pairs, preserving their order.
///
/// # Examples
///
/// ```rust
/// use frozenmap::ordered_immutable_map;
///
/// let map = ordered_immutable_map! { "z" => 26, "a" => 1 };
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, vec!["z", "a"]);
/// ```
#[macro_export]
macro_rules! ordered_immutable_map {
    () => {
        <$crate::map::OrderedImmutableMap<_, _>>::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {
        <$crate::map::OrderedImmutableMap<_, _>>::from([$(($key, $value)),+])
    };
}
