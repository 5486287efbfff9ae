//! The immutable map type shared by the ordered and unordered variants.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::convert::Infallible;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Index;
use std::sync::OnceLock;

use indexmap::IndexMap;

use super::ReferenceCounter;
use super::backing::{Backing, HashStorage, OrderedStorage};
use super::builder::MapBuilder;
use crate::error::FrozenError;

// =============================================================================
// Pair hashing
// =============================================================================

/// Hashes one `(key, value)` entry with a fixed, deterministic hasher.
///
/// Fingerprints are the XOR of these pair hashes, so they do not depend on
/// iteration order or on the backing's `BuildHasher`.
pub(crate) fn pair_hash<K: Hash + ?Sized, V: Hash + ?Sized>(key: &K, value: &V) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    value.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// ImmutableMap Definition
// =============================================================================

/// Shared state of an [`ImmutableMap`]: the entries and the memoised fingerprint.
struct Frozen<M> {
    entries: M,
    /// Written at most once. Concurrent first computations race benignly:
    /// every contender derives the same value from the same entries.
    fingerprint: OnceLock<u64>,
}

/// A read-only, hashable mapping.
///
/// `ImmutableMap` is built once from any number of sources and never changes
/// afterwards. Clones share the same entries; [`copy`](Self::copy) builds a
/// fresh instance with overrides applied.
///
/// The third type parameter selects the storage:
///
/// | Storage                            | Alias                      | Iteration order   |
/// |------------------------------------|----------------------------|-------------------|
/// | [`HashStorage`] (default)          | `ImmutableMap<K, V>`       | unspecified       |
/// | [`OrderedStorage`]                 | [`OrderedImmutableMap`]    | construction order |
///
/// Immutability is shallow: values are stored as given. Use
/// [`freeze`](crate::freeze) to convert nested [`Value`](crate::value::Value)
/// trees deeply.
///
/// # Examples
///
/// ```rust
/// use frozenmap::map::ImmutableMap;
///
/// let map: ImmutableMap<&str, i32> = ImmutableMap::from_sources([
///     vec![("a", 0), ("b", 1)],
///     vec![("b", 2), ("c", 3)],
/// ]);
///
/// assert_eq!(map.get("b"), Some(&2));
/// assert_eq!(map.len(), 3);
/// ```
///
/// Assigning through an index does not compile:
///
/// ```compile_fail
/// use frozenmap::map::ImmutableMap;
///
/// let mut map: ImmutableMap<&str, i32> = [("a", 0)].into();
/// map["a"] = 1;
/// ```
pub struct ImmutableMap<K, V, M = HashStorage<K, V>> {
    inner: ReferenceCounter<Frozen<M>>,
    marker: PhantomData<fn() -> (K, V)>,
}

/// An [`ImmutableMap`] whose iteration order is the order in which keys
/// were first inserted during construction.
///
/// # Examples
///
/// ```rust
/// use frozenmap::map::OrderedImmutableMap;
///
/// let map: OrderedImmutableMap<&str, i32> =
///     [("a", 0), ("c", 2), ("b", 1), ("d", 3)].into();
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, vec!["a", "c", "b", "d"]);
/// ```
pub type OrderedImmutableMap<K, V> = ImmutableMap<K, V, OrderedStorage<K, V>>;

impl<K, V, M> ImmutableMap<K, V, M>
where
    M: Backing<K, V>,
{
    pub(crate) fn from_backing(entries: M) -> Self {
        Self {
            inner: ReferenceCounter::new(Frozen {
                entries,
                fingerprint: OnceLock::new(),
            }),
            marker: PhantomData,
        }
    }

    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use frozenmap::map::ImmutableMap;
    ///
    /// let map: ImmutableMap<String, i32> = ImmutableMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from_backing(M::allocate(0))
    }

    /// Returns a [`MapBuilder`] for merging several sources of different types.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use frozenmap::map::ImmutableMap;
    /// use std::collections::HashMap;
    ///
    /// let defaults = HashMap::from([("a", 0), ("b", 1)]);
    /// let map: ImmutableMap<&str, i32> = ImmutableMap::builder()
    ///     .merge(defaults)
    ///     .merge(vec![("b", 2)])
    ///     .pair("c", 3)
    ///     .build();
    ///
    /// assert_eq!(map, ImmutableMap::<&str, i32>::from([("a", 0), ("b", 2), ("c", 3)]));
    /// ```
    #[inline]
    #[must_use]
    pub fn builder() -> MapBuilder<K, V, M> {
        MapBuilder::new()
    }

    /// Creates a map by merging `sources` from left to right.
    ///
    /// When several sources define the same key, the last one wins. Keyword
    /// style pairs are simply the final source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use frozenmap::map::ImmutableMap;
    ///
    /// let map: ImmutableMap<&str, i32> =
    ///     ImmutableMap::from_sources([vec![("a", 0), ("b", 1)], vec![("b", 2), ("c", 3)]]);
    ///
    /// assert_eq!(map, ImmutableMap::<&str, i32>::from([("a", 0), ("b", 2), ("c", 3)]));
    /// ```
    pub fn from_sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = (K, V)>,
    {
        sources
            .into_iter()
            .fold(MapBuilder::new(), MapBuilder::merge)
            .build()
    }

    /// Returns the number of entries in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.size()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference to the value for `key`, or `None` if it is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use frozenmap::map::ImmutableMap;
    ///
    /// let map: ImmutableMap<String, &str> = [("key".to_string(), "value")].into();
    /// assert_eq!(map.get("key"), Some(&"value"));
    /// assert_eq!(map.get("other"), None);
    /// ```
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.entries.find(key).map(|(_, value)| value)
    }

    /// Returns the stored key and value for `key`.
    #[inline]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.entries.find(key)
    }

    /// Returns the value for `key`, or [`FrozenError::KeyNotFound`].
    ///
    /// # Errors
    ///
    /// Fails with [`FrozenError::KeyNotFound`] when `key` is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use frozenmap::{FrozenError, map::ImmutableMap};
    ///
    /// let map: ImmutableMap<&str, i32> = [("a", 0)].into();
    /// assert_eq!(map.lookup("a"), Ok(&0));
    /// assert!(matches!(map.lookup("z"), Err(FrozenError::KeyNotFound { .. })));
    /// ```
    pub fn lookup<Q>(&self, key: &Q) -> Result<&V, FrozenError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.get(key)
            .ok_or_else(|| FrozenError::key_not_found(key))
    }

    /// Returns the value for `key`, or `default` when it is absent.
    #[inline]
    pub fn get_or<'a, Q>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).unwrap_or(default)
    }

    /// Returns `true` if the map contains `key`.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.entries.find(key).is_some()
    }

    /// Returns an iterator over the entries.
    ///
    /// Each call starts a fresh iteration. The order is unspecified for
    /// [`ImmutableMap`] and construction order for [`OrderedImmutableMap`].
    #[inline]
    pub fn iter(&self) -> M::Iter<'_> {
        self.inner.entries.entries()
    }

    /// Returns an iterator over the keys, in the same order as [`iter`](Self::iter).
    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + Clone {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values, in the same order as [`iter`](Self::iter).
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + Clone {
        self.iter().map(|(_, value)| value)
    }

    /// Returns a new map of the same variant holding every entry of `self`
    /// with `overrides` merged on top.
    ///
    /// `self` is left untouched. In the ordered variant existing keys keep
    /// their position and new keys are appended in override order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use frozenmap::map::ImmutableMap;
    ///
    /// let map: ImmutableMap<&str, i32> = [("a", 0), ("b", 1)].into();
    /// let copied = map.copy([("b", 2), ("c", 3)]);
    ///
    /// assert_eq!(copied, ImmutableMap::<&str, i32>::from([("a", 0), ("b", 2), ("c", 3)]));
    /// assert_eq!(map, ImmutableMap::<&str, i32>::from([("a", 0), ("b", 1)]));
    /// ```
    #[must_use]
    pub fn copy<I>(&self, overrides: I) -> Self
    where
        K: Clone,
        V: Clone,
        I: IntoIterator<Item = (K, V)>,
    {
        MapBuilder::with_capacity(self.len())
            .merge(
                self.iter()
                    .map(|(key, value)| (key.clone(), value.clone())),
            )
            .merge(overrides)
            .build()
    }

    /// Returns `true` if both maps share the same underlying entries.
    ///
    /// Clones share entries; [`copy`](Self::copy) never does.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns the name of the variant, `"ImmutableMap"` or `"OrderedImmutableMap"`.
    #[inline]
    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        M::NAME
    }

    /// Consumes the map into its storage, cloning only if the entries are shared.
    pub(crate) fn into_backing(self) -> M
    where
        K: Clone,
        V: Clone,
    {
        match ReferenceCounter::try_unwrap(self.inner) {
            Ok(frozen) => frozen.entries,
            Err(shared) => {
                let mut entries = M::allocate(shared.entries.size());
                for (key, value) in shared.entries.entries() {
                    entries.store(key.clone(), value.clone());
                }
                entries
            }
        }
    }

    /// Returns the memoised fingerprint, computing it with `pair` on first use.
    ///
    /// A failure is not cached; the next call recomputes and fails again.
    pub(crate) fn try_fingerprint_with<E, F>(&self, mut pair: F) -> Result<u64, E>
    where
        F: FnMut(&K, &V) -> Result<u64, E>,
    {
        if let Some(&fingerprint) = self.inner.fingerprint.get() {
            return Ok(fingerprint);
        }

        let mut fingerprint = 0_u64;
        for (key, value) in self.iter() {
            fingerprint ^= pair(key, value)?;
        }

        tracing::debug!(
            variant = M::NAME,
            entries = self.len(),
            fingerprint,
            "computed map fingerprint"
        );
        Ok(*self.inner.fingerprint.get_or_init(|| fingerprint))
    }

    /// Returns the order-independent hash of the map.
    ///
    /// The fingerprint is the XOR of a hash of every `(key, value)` entry. It
    /// is computed on first request and cached for the lifetime of the
    /// entries, which clones share. Equal maps have equal fingerprints,
    /// whichever variant they are.
    ///
    /// Values that cannot be hashed are rejected at compile time by the
    /// `V: Hash` bound.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use frozenmap::map::{ImmutableMap, OrderedImmutableMap};
    ///
    /// let first: ImmutableMap<&str, i32> = [("a", 0), ("b", 1)].into();
    /// let second: OrderedImmutableMap<&str, i32> = [("b", 1), ("a", 0)].into();
    ///
    /// assert_eq!(first.fingerprint(), second.fingerprint());
    /// ```
    pub fn fingerprint(&self) -> u64
    where
        K: Hash,
        V: Hash,
    {
        match self.try_fingerprint_with(|key, value| Ok::<u64, Infallible>(pair_hash(key, value))) {
            Ok(fingerprint) => fingerprint,
            Err(never) => match never {},
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, M> Clone for ImmutableMap<K, V, M> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            inner: ReferenceCounter::clone(&self.inner),
            marker: PhantomData,
        }
    }
}

impl<K, V, M> Default for ImmutableMap<K, V, M>
where
    M: Backing<K, V>,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, M> FromIterator<(K, V)> for ImmutableMap<K, V, M>
where
    M: Backing<K, V>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MapBuilder::new().merge(iter).build()
    }
}

impl<K, V, M, const N: usize> From<[(K, V); N]> for ImmutableMap<K, V, M>
where
    M: Backing<K, V>,
{
    fn from(entries: [(K, V); N]) -> Self {
        MapBuilder::with_capacity(N).merge(entries).build()
    }
}

impl<K, V, M, S> From<HashMap<K, V, S>> for ImmutableMap<K, V, M>
where
    M: Backing<K, V>,
{
    fn from(entries: HashMap<K, V, S>) -> Self {
        MapBuilder::with_capacity(entries.len())
            .merge(entries)
            .build()
    }
}

impl<K, V, M, S> From<IndexMap<K, V, S>> for ImmutableMap<K, V, M>
where
    M: Backing<K, V>,
{
    fn from(entries: IndexMap<K, V, S>) -> Self {
        MapBuilder::with_capacity(entries.len())
            .merge(entries)
            .build()
    }
}

impl<K, V, M> IntoIterator for ImmutableMap<K, V, M>
where
    K: Clone,
    V: Clone,
    M: Backing<K, V>,
{
    type Item = (K, V);
    type IntoIter = M::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.into_backing().into_entries()
    }
}

impl<'a, K, V, M> IntoIterator for &'a ImmutableMap<K, V, M>
where
    M: Backing<K, V>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = M::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// # Panics
///
/// Panics if `key` is not present, matching `std::collections::HashMap`.
/// Use [`ImmutableMap::lookup`] for a fallible lookup.
impl<K, V, M, Q> Index<&Q> for ImmutableMap<K, V, M>
where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    M: Backing<K, V>,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key)
            .unwrap_or_else(|| panic!("key not found in {}", M::NAME))
    }
}

impl<K, V, M, N> PartialEq<ImmutableMap<K, V, N>> for ImmutableMap<K, V, M>
where
    K: Hash + Eq,
    V: PartialEq,
    M: Backing<K, V>,
    N: Backing<K, V>,
{
    fn eq(&self, other: &ImmutableMap<K, V, N>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|other_value| value == other_value))
    }
}

impl<K, V, M> Eq for ImmutableMap<K, V, M>
where
    K: Hash + Eq,
    V: Eq,
    M: Backing<K, V>,
{
}

impl<K, V, M, S> PartialEq<HashMap<K, V, S>> for ImmutableMap<K, V, M>
where
    K: Hash + Eq,
    V: PartialEq,
    M: Backing<K, V>,
    S: BuildHasher,
{
    fn eq(&self, other: &HashMap<K, V, S>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|other_value| value == other_value))
    }
}

impl<K, V, M, S> PartialEq<IndexMap<K, V, S>> for ImmutableMap<K, V, M>
where
    K: Hash + Eq,
    V: PartialEq,
    M: Backing<K, V>,
    S: BuildHasher,
{
    fn eq(&self, other: &IndexMap<K, V, S>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|other_value| value == other_value))
    }
}

/// Hashes the map through its cached [`fingerprint`](ImmutableMap::fingerprint),
/// so equal maps of either variant hash identically.
///
/// # Examples
///
/// ```rust
/// use frozenmap::map::ImmutableMap;
/// use std::collections::HashMap;
///
/// let key: ImmutableMap<&str, i32> = [("a", 0), ("b", 1)].into();
///
/// let mut memo = HashMap::new();
/// memo.insert(key.clone(), "cached");
/// let same: ImmutableMap<&str, i32> = [("b", 1), ("a", 0)].into();
/// assert_eq!(memo.get(&same), Some(&"cached"));
/// ```
impl<K, V, M> Hash for ImmutableMap<K, V, M>
where
    K: Hash,
    V: Hash,
    M: Backing<K, V>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.fingerprint());
    }
}

impl<K, V, M> fmt::Debug for ImmutableMap<K, V, M>
where
    K: fmt::Debug,
    V: fmt::Debug,
    M: Backing<K, V>,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<{} ", M::NAME)?;
        formatter.debug_map().entries(self.iter()).finish()?;
        formatter.write_str(">")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V, M> serde::Serialize for ImmutableMap<K, V, M>
where
    K: serde::Serialize,
    V: serde::Serialize,
    M: Backing<K, V>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct ImmutableMapVisitor<K, V, M> {
    marker: PhantomData<fn() -> (K, V, M)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V, M> serde::de::Visitor<'de> for ImmutableMapVisitor<K, V, M>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    M: Backing<K, V>,
{
    type Value = ImmutableMap<K, V, M>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        // Untrusted size hints are capped; the storage grows as needed.
        let capacity = access.size_hint().unwrap_or(0).min(4096);
        let mut builder = MapBuilder::with_capacity(capacity);
        while let Some((key, value)) = access.next_entry()? {
            builder = builder.pair(key, value);
        }
        Ok(builder.build())
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, M> serde::Deserialize<'de> for ImmutableMap<K, V, M>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    M: Backing<K, V>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(ImmutableMapVisitor {
            marker: PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
