//! Mutation as a capability that frozen containers refuse.

use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;

use super::backing::Backing;
use super::immutable::ImmutableMap;
use crate::error::FrozenError;

/// In-place mutation of a mapping, reported through `Result`.
///
/// Plain mutable maps (`HashMap`, `IndexMap`) implement every operation.
/// [`ImmutableMap`] implements the trait only to reject each call with
/// [`FrozenError::UnsupportedOperation`]; it has no other way to change.
///
/// # Examples
///
/// ```rust
/// use frozenmap::map::{ImmutableMap, MutableMapping};
/// use std::collections::HashMap;
///
/// fn reset<M: MutableMapping<&'static str, i32>>(mapping: &mut M) -> bool {
///     mapping.set_item("count", 0).is_ok()
/// }
///
/// let mut plain = HashMap::new();
/// let mut frozen: ImmutableMap<&str, i32> = ImmutableMap::new();
///
/// assert!(reset(&mut plain));
/// assert!(!reset(&mut frozen));
/// assert!(frozen.is_empty());
/// ```
pub trait MutableMapping<K, V> {
    /// Assigns `value` to `key`, returning the value it replaced.
    ///
    /// # Errors
    ///
    /// Fails with [`FrozenError::UnsupportedOperation`] on frozen containers.
    fn set_item(&mut self, key: K, value: V) -> Result<Option<V>, FrozenError>;

    /// Removes `key`, returning its value.
    ///
    /// # Errors
    ///
    /// Fails with [`FrozenError::KeyNotFound`] if `key` is absent, or
    /// [`FrozenError::UnsupportedOperation`] on frozen containers.
    fn del_item(&mut self, key: &K) -> Result<V, FrozenError>;

    /// Removes every entry.
    ///
    /// # Errors
    ///
    /// Fails with [`FrozenError::UnsupportedOperation`] on frozen containers.
    fn clear_items(&mut self) -> Result<(), FrozenError>;

    /// Merges `pairs` into the mapping, last write wins.
    ///
    /// # Errors
    ///
    /// Fails with [`FrozenError::UnsupportedOperation`] on frozen containers.
    fn update_items<I>(&mut self, pairs: I) -> Result<(), FrozenError>
    where
        I: IntoIterator<Item = (K, V)>;
}

impl<K, V, S> MutableMapping<K, V> for HashMap<K, V, S>
where
    K: Hash + Eq + fmt::Debug,
    S: BuildHasher,
{
    fn set_item(&mut self, key: K, value: V) -> Result<Option<V>, FrozenError> {
        Ok(self.insert(key, value))
    }

    fn del_item(&mut self, key: &K) -> Result<V, FrozenError> {
        self.remove(key)
            .ok_or_else(|| FrozenError::key_not_found(key))
    }

    fn clear_items(&mut self) -> Result<(), FrozenError> {
        self.clear();
        Ok(())
    }

    fn update_items<I>(&mut self, pairs: I) -> Result<(), FrozenError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.extend(pairs);
        Ok(())
    }
}

impl<K, V, S> MutableMapping<K, V> for IndexMap<K, V, S>
where
    K: Hash + Eq + fmt::Debug,
    S: BuildHasher,
{
    fn set_item(&mut self, key: K, value: V) -> Result<Option<V>, FrozenError> {
        Ok(self.insert(key, value))
    }

    fn del_item(&mut self, key: &K) -> Result<V, FrozenError> {
        self.shift_remove(key)
            .ok_or_else(|| FrozenError::key_not_found(key))
    }

    fn clear_items(&mut self) -> Result<(), FrozenError> {
        self.clear();
        Ok(())
    }

    fn update_items<I>(&mut self, pairs: I) -> Result<(), FrozenError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.extend(pairs);
        Ok(())
    }
}

impl<K, V, M> MutableMapping<K, V> for ImmutableMap<K, V, M>
where
    M: Backing<K, V>,
{
    fn set_item(&mut self, _key: K, _value: V) -> Result<Option<V>, FrozenError> {
        Err(FrozenError::unsupported(M::NAME, "item assignment"))
    }

    fn del_item(&mut self, _key: &K) -> Result<V, FrozenError> {
        Err(FrozenError::unsupported(M::NAME, "item deletion"))
    }

    fn clear_items(&mut self) -> Result<(), FrozenError> {
        Err(FrozenError::unsupported(M::NAME, "clearing"))
    }

    fn update_items<I>(&mut self, _pairs: I) -> Result<(), FrozenError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Err(FrozenError::unsupported(M::NAME, "in-place update"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::OrderedImmutableMap;
    use rstest::rstest;

    #[rstest]
    fn test_hash_map_accepts_every_mutation() {
        let mut map: HashMap<&str, i32> = HashMap::new();

        assert_eq!(map.set_item("a", 0), Ok(None));
        assert_eq!(map.set_item("a", 1), Ok(Some(0)));
        assert_eq!(map.update_items([("b", 2)]), Ok(()));
        assert_eq!(map.del_item(&"a"), Ok(1));
        assert!(matches!(map.del_item(&"a"), Err(FrozenError::KeyNotFound { .. })));
        assert_eq!(map.clear_items(), Ok(()));
        assert!(map.is_empty());
    }

    #[rstest]
    fn test_index_map_deletion_preserves_order() {
        let mut map: IndexMap<&str, i32> = IndexMap::new();
        map.update_items([("a", 0), ("b", 1), ("c", 2)]).unwrap();
        map.del_item(&"b").unwrap();

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[rstest]
    fn test_immutable_map_rejects_every_mutation() {
        let mut map: ImmutableMap<&str, i32> = [("a", 0)].into();

        assert_eq!(
            map.set_item("a", 1),
            Err(FrozenError::unsupported("ImmutableMap", "item assignment"))
        );
        assert_eq!(
            map.del_item(&"a"),
            Err(FrozenError::unsupported("ImmutableMap", "item deletion"))
        );
        assert!(map.clear_items().unwrap_err().is_unsupported_operation());
        assert!(map.update_items([("b", 1)]).unwrap_err().is_unsupported_operation());
        assert_eq!(map.get("a"), Some(&0));
        assert_eq!(map.len(), 1);
    }

    #[rstest]
    fn test_ordered_immutable_map_reports_its_own_name() {
        let mut map: OrderedImmutableMap<&str, i32> = OrderedImmutableMap::new();
        let error = map.set_item("key", 1).unwrap_err();

        assert_eq!(
            error.to_string(),
            "'OrderedImmutableMap' object does not support item assignment"
        );
    }
}
