//! A one-shot builder that merges heterogeneous sources into an immutable map.

use std::marker::PhantomData;

use super::backing::Backing;
use super::immutable::ImmutableMap;

/// Collects entries from several sources, then freezes them into an
/// [`ImmutableMap`].
///
/// Sources are merged in call order with last-write-wins semantics. This is
/// the Rust spelling of "any number of positional mappings followed by
/// keyword pairs": call [`merge`](Self::merge) once per source and
/// [`pair`](Self::pair) once per keyword pair.
///
/// The builder is consumed by [`build`](Self::build); no map is ever
/// observable while it is still being filled.
///
/// # Examples
///
/// ```rust
/// use frozenmap::map::{MapBuilder, OrderedImmutableMap};
///
/// let map: OrderedImmutableMap<&str, i32> = MapBuilder::new()
///     .merge([("a", 0), ("b", 1)])
///     .pair("b", 2)
///     .pair("c", 3)
///     .build();
///
/// let entries: Vec<_> = map.iter().map(|(key, value)| (*key, *value)).collect();
/// assert_eq!(entries, vec![("a", 0), ("b", 2), ("c", 3)]);
/// ```
pub struct MapBuilder<K, V, M> {
    entries: M,
    marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V, M> MapBuilder<K, V, M>
where
    M: Backing<K, V>,
{
    /// Creates an empty builder.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty builder with room for `capacity` entries.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: M::allocate(capacity),
            marker: PhantomData,
        }
    }

    /// Merges every entry of `source`, overriding keys already present.
    #[must_use]
    pub fn merge<I>(mut self, source: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in source {
            self.entries.store(key, value);
        }
        self
    }

    /// Adds a single entry, overriding the key if it is already present.
    #[must_use]
    pub fn pair(mut self, key: K, value: V) -> Self {
        self.entries.store(key, value);
        self
    }

    /// Returns the number of distinct keys collected so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.size()
    }

    /// Returns `true` if nothing has been collected yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freezes the collected entries.
    #[must_use]
    pub fn build(self) -> ImmutableMap<K, V, M> {
        ImmutableMap::from_backing(self.entries)
    }
}

impl<K, V, M> Default for MapBuilder<K, V, M>
where
    M: Backing<K, V>,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{HashStorage, OrderedStorage};
    use rstest::rstest;

    #[rstest]
    fn test_pairs_are_applied_after_merged_sources() {
        let map = MapBuilder::<&str, i32, HashStorage<&str, i32>>::new()
            .merge(vec![("a", 0), ("b", 1)])
            .pair("b", 2)
            .build();

        assert_eq!(map.get("a"), Some(&0));
        assert_eq!(map.get("b"), Some(&2));
    }

    #[rstest]
    fn test_len_counts_distinct_keys() {
        let builder = MapBuilder::<&str, i32, OrderedStorage<&str, i32>>::new()
            .pair("a", 0)
            .pair("a", 1)
            .pair("b", 2);

        assert_eq!(builder.len(), 2);
        assert!(!builder.is_empty());
    }
}
