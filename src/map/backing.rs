//! Storage strategies behind [`ImmutableMap`](super::ImmutableMap).
//!
//! The set of backings is closed: a plain `HashMap` for the unordered
//! variant and an `IndexMap` for the order-preserving variant.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;

use indexmap::IndexMap;

/// Hash builder used by both backings.
///
/// - `fxhash` feature: `rustc_hash::FxBuildHasher`
/// - `ahash` feature (without `fxhash`): `ahash::RandomState`
/// - otherwise: `std::hash::RandomState`
///
/// The choice only affects bucket placement. Map fingerprints are computed
/// with a fixed hasher and are identical under every feature combination.
#[cfg(feature = "fxhash")]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

/// Hash builder used by both backings.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

/// Hash builder used by both backings.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder = std::hash::RandomState;

/// Storage of the unordered [`ImmutableMap`](super::ImmutableMap).
pub type HashStorage<K, V> = HashMap<K, V, DefaultHashBuilder>;

/// Storage of [`OrderedImmutableMap`](super::OrderedImmutableMap).
pub type OrderedStorage<K, V> = IndexMap<K, V, DefaultHashBuilder>;

mod sealed {
    pub trait Sealed {}

    impl<K, V, S> Sealed for std::collections::HashMap<K, V, S> {}
    impl<K, V, S> Sealed for indexmap::IndexMap<K, V, S> {}
}

/// The read and build operations an immutable map needs from its storage.
///
/// This trait is sealed. It is implemented for `HashMap` (iteration order
/// unspecified) and `IndexMap` (iteration in insertion order).
pub trait Backing<K, V>: sealed::Sealed {
    /// The name reported in debug output and error messages.
    const NAME: &'static str;

    /// Borrowing iterator over entries.
    type Iter<'a>: Iterator<Item = (&'a K, &'a V)> + ExactSizeIterator + FusedIterator + Clone
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Owning iterator over entries.
    type IntoIter: Iterator<Item = (K, V)> + ExactSizeIterator + FusedIterator;

    /// Creates empty storage with room for `capacity` entries.
    fn allocate(capacity: usize) -> Self;

    /// Stores an entry, replacing the value of an existing key.
    ///
    /// An ordered backing keeps a replaced key at its original position.
    fn store(&mut self, key: K, value: V);

    /// Finds the stored key and value for `key`.
    fn find<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Returns the number of entries.
    fn size(&self) -> usize;

    /// Iterates over the entries.
    fn entries<'a>(&'a self) -> Self::Iter<'a>
    where
        K: 'a,
        V: 'a;

    /// Consumes the storage into its entries.
    fn into_entries(self) -> Self::IntoIter;
}

impl<K, V, S> Backing<K, V> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    const NAME: &'static str = "ImmutableMap";

    type Iter<'a>
        = hash_map::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    type IntoIter = hash_map::IntoIter<K, V>;

    fn allocate(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }

    fn store(&mut self, key: K, value: V) {
        Self::insert(self, key, value);
    }

    fn find<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key)
    }

    fn size(&self) -> usize {
        Self::len(self)
    }

    fn entries<'a>(&'a self) -> Self::Iter<'a>
    where
        K: 'a,
        V: 'a,
    {
        Self::iter(self)
    }

    fn into_entries(self) -> Self::IntoIter {
        IntoIterator::into_iter(self)
    }
}

impl<K, V, S> Backing<K, V> for IndexMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    const NAME: &'static str = "OrderedImmutableMap";

    type Iter<'a>
        = indexmap::map::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    type IntoIter = indexmap::map::IntoIter<K, V>;

    fn allocate(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }

    fn store(&mut self, key: K, value: V) {
        // `insert` leaves a replaced key at its original index.
        Self::insert(self, key, value);
    }

    fn find<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key)
    }

    fn size(&self) -> usize {
        Self::len(self)
    }

    fn entries<'a>(&'a self) -> Self::Iter<'a>
    where
        K: 'a,
        V: 'a,
    {
        Self::iter(self)
    }

    fn into_entries(self) -> Self::IntoIter {
        IntoIterator::into_iter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_ordered_store_keeps_position_of_replaced_key() {
        let mut storage: OrderedStorage<&str, i32> = Backing::allocate(4);
        storage.store("a", 0);
        storage.store("b", 1);
        storage.store("a", 2);

        let entries: Vec<_> = storage.entries().collect();
        assert_eq!(entries, vec![(&"a", &2), (&"b", &1)]);
    }

    #[rstest]
    fn test_hash_store_replaces_value() {
        let mut storage: HashStorage<&str, i32> = Backing::allocate(0);
        storage.store("a", 0);
        storage.store("a", 1);

        assert_eq!(storage.size(), 1);
        assert_eq!(storage.find("a"), Some((&"a", &1)));
        assert_eq!(storage.find("b"), None);
    }

    #[rstest]
    fn test_backing_names() {
        assert_eq!(<HashStorage<i32, i32> as Backing<i32, i32>>::NAME, "ImmutableMap");
        assert_eq!(
            <OrderedStorage<i32, i32> as Backing<i32, i32>>::NAME,
            "OrderedImmutableMap"
        );
    }
}
