//! Dynamic nested values for [`freeze`](crate::freeze) and
//! [`unfreeze`](crate::unfreeze).
//!
//! [`Value`] is a closed union of the container kinds the conversions
//! understand: scalars, sequences (mutable [`Value::List`] and fixed-size
//! [`Value::Tuple`]) and mappings in four flavours (mutable or frozen,
//! unordered or order-preserving). [`Value::kind`] reduces every variant to
//! one of the four [`ValueKind`] tags the conversions dispatch on.
//!
//! # Examples
//!
//! ```rust
//! use frozenmap::value::{Key, Value, ValueKind};
//! use std::collections::HashMap;
//!
//! let config = Value::from(HashMap::from([
//!     (Key::from("name"), Value::from("service")),
//!     (Key::from("ports"), Value::from(vec![Value::from(80), Value::from(443)])),
//! ]));
//!
//! assert_eq!(config.kind(), ValueKind::UnorderedMapping);
//! assert!(!config.is_frozen());
//! ```

mod access;
mod convert;
mod hash;
mod hashable;
#[cfg(feature = "serde")]
mod serialization;

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use crate::map::{ImmutableMap, OrderedImmutableMap};

pub use hashable::HashableValue;

// =============================================================================
// Key
// =============================================================================

/// A mapping key inside a [`Value`].
///
/// Booleans, integers and strings have their own variants. Any other
/// hashable value, such as a float or a frozen tuple or map, is carried by
/// [`Key::Frozen`]. Converting through [`From<HashableValue>`] or
/// [`TryFrom<Value>`] always picks the scalar variant when one applies, so
/// equal keys share a variant.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A boolean key.
    Bool(bool),
    /// An integer key.
    Int(i64),
    /// A string key.
    Str(String),
    /// Any other hashable value.
    Frozen(HashableValue),
}

impl Key {
    /// Returns the string if this is a [`Key::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(string) => Some(string),
            _ => None,
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(boolean) => fmt::Debug::fmt(boolean, formatter),
            Self::Int(integer) => fmt::Debug::fmt(integer, formatter),
            Self::Str(string) => fmt::Debug::fmt(string, formatter),
            Self::Frozen(value) => fmt::Debug::fmt(value, formatter),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(boolean) => write!(formatter, "{boolean}"),
            Self::Int(integer) => write!(formatter, "{integer}"),
            Self::Str(string) => formatter.write_str(string),
            Self::Frozen(value) => write!(formatter, "{value:?}"),
        }
    }
}

// =============================================================================
// Value
// =============================================================================

/// The dispatch tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Anything that is not a container.
    Scalar,
    /// [`Value::List`] or [`Value::Tuple`].
    Sequence,
    /// [`Value::OrderedDict`] or [`Value::OrderedMap`].
    OrderedMapping,
    /// [`Value::Dict`] or [`Value::Map`].
    UnorderedMapping,
}

/// A dynamically typed value that may nest sequences and mappings.
///
/// Mutable containers are `List`, `Dict` and `OrderedDict`. Their frozen
/// counterparts are `Tuple`, `Map` and `OrderedMap`.
///
/// # Equality
///
/// - Mapping variants compare by their set of entries, regardless of
///   order or mutability: a `Dict` equals a `Map` with the same entries.
/// - `List` and `Tuple` never compare equal to each other.
/// - `Int` and `Float` are distinct. Floats compare equal when they have
///   the same bits or are IEEE-equal, so `Float(NaN)` equals itself and
///   `0.0` equals `-0.0`. This makes equality agree with
///   [`try_hash`](Self::try_hash).
///
/// # Limitations
///
/// The set of containers is closed. A custom collection has to be
/// converted into one of these variants before it can take part in
/// [`freeze`](crate::freeze) or [`unfreeze`](crate::unfreeze); there is no
/// variant that would carry it through unconverted.
#[derive(Clone, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// A mutable sequence.
    List(Vec<Value>),
    /// A fixed-size immutable sequence.
    Tuple(Box<[Value]>),
    /// A mutable mapping with unspecified order.
    Dict(HashMap<Key, Value>),
    /// A mutable mapping that preserves insertion order.
    OrderedDict(IndexMap<Key, Value>),
    /// A frozen mapping with unspecified order.
    Map(ImmutableMap<Key, Value>),
    /// A frozen mapping that preserves construction order.
    OrderedMap(OrderedImmutableMap<Key, Value>),
}

impl Value {
    /// Returns the dispatch tag of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::List(_) | Self::Tuple(_) => ValueKind::Sequence,
            Self::OrderedDict(_) | Self::OrderedMap(_) => ValueKind::OrderedMapping,
            Self::Dict(_) | Self::Map(_) => ValueKind::UnorderedMapping,
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::Str(_) => {
                ValueKind::Scalar
            }
        }
    }

    /// Returns the name used for this value in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Dict(_) => "dict",
            Self::OrderedDict(_) => "OrderedDict",
            Self::Map(_) => "ImmutableMap",
            Self::OrderedMap(_) => "OrderedImmutableMap",
        }
    }

    /// Returns `true` if this value itself cannot be mutated.
    ///
    /// Only the outermost layer is inspected; see
    /// [`is_deeply_frozen`](Self::is_deeply_frozen).
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Dict(_) | Self::OrderedDict(_))
    }

    /// Returns `true` if no mutable container occurs anywhere in this value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use frozenmap::{freeze, value::Value};
    ///
    /// let nested = Value::from(vec![Value::from(vec![Value::from(1)])]);
    /// assert!(!nested.is_deeply_frozen());
    /// assert!(freeze(nested).is_deeply_frozen());
    /// ```
    #[must_use]
    pub fn is_deeply_frozen(&self) -> bool {
        match self {
            Self::Tuple(items) => items.iter().all(Self::is_deeply_frozen),
            Self::Map(map) => map.values().all(Self::is_deeply_frozen),
            Self::OrderedMap(map) => map.values().all(Self::is_deeply_frozen),
            other => other.is_frozen(),
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the integer if this is a [`Value::Int`].
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(integer) => Some(*integer),
            _ => None,
        }
    }

    /// Returns the string if this is a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(string) => Some(string),
            _ => None,
        }
    }

    /// Returns the elements if this is a sequence.
    #[must_use]
    pub fn as_slice(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Returns a read-only view if this is a mapping.
    pub(crate) fn as_mapping(&self) -> Option<MappingRef<'_>> {
        match self {
            Self::Dict(entries) => Some(MappingRef::Dict(entries)),
            Self::OrderedDict(entries) => Some(MappingRef::OrderedDict(entries)),
            Self::Map(map) => Some(MappingRef::Map(map)),
            Self::OrderedMap(map) => Some(MappingRef::OrderedMap(map)),
            _ => None,
        }
    }

    /// Returns the number of entries of a mapping or elements of a sequence.
    #[must_use]
    pub fn size(&self) -> Option<usize> {
        self.as_slice()
            .map(<[Self]>::len)
            .or_else(|| self.as_mapping().map(|mapping| mapping.len()))
    }
}

// =============================================================================
// Mapping view
// =============================================================================

/// Uniform read access over the four mapping variants.
#[derive(Clone, Copy)]
pub(crate) enum MappingRef<'a> {
    Dict(&'a HashMap<Key, Value>),
    OrderedDict(&'a IndexMap<Key, Value>),
    Map(&'a ImmutableMap<Key, Value>),
    OrderedMap(&'a OrderedImmutableMap<Key, Value>),
}

impl<'a> MappingRef<'a> {
    pub(crate) fn len(self) -> usize {
        match self {
            Self::Dict(entries) => entries.len(),
            Self::OrderedDict(entries) => entries.len(),
            Self::Map(map) => map.len(),
            Self::OrderedMap(map) => map.len(),
        }
    }

    pub(crate) fn get(self, key: &Key) -> Option<&'a Value> {
        match self {
            Self::Dict(entries) => entries.get(key),
            Self::OrderedDict(entries) => entries.get(key),
            Self::Map(map) => map.get(key),
            Self::OrderedMap(map) => map.get(key),
        }
    }

    pub(crate) fn iter(self) -> Box<dyn Iterator<Item = (&'a Key, &'a Value)> + 'a> {
        match self {
            Self::Dict(entries) => Box::new(entries.iter()),
            Self::OrderedDict(entries) => Box::new(entries.iter()),
            Self::Map(map) => Box::new(map.iter()),
            Self::OrderedMap(map) => Box::new(map.iter()),
        }
    }

    fn set_eq(self, other: Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|other_value| value == other_value))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            // Same bits or IEEE-equal: NaN is reflexive and 0.0 == -0.0.
            (Self::Float(left), Self::Float(right)) => {
                left.to_bits() == right.to_bits() || left == right
            }
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::List(left), Self::List(right)) => left == right,
            (Self::Tuple(left), Self::Tuple(right)) => left == right,
            _ => match (self.as_mapping(), other.as_mapping()) {
                (Some(left), Some(right)) => left.set_eq(right),
                _ => false,
            },
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("null"),
            Self::Bool(boolean) => fmt::Debug::fmt(boolean, formatter),
            Self::Int(integer) => fmt::Debug::fmt(integer, formatter),
            Self::Float(float) => fmt::Debug::fmt(float, formatter),
            Self::Str(string) => fmt::Debug::fmt(string, formatter),
            Self::List(items) => formatter.debug_list().entries(items).finish(),
            Self::Tuple(items) if items.is_empty() => formatter.write_str("()"),
            Self::Tuple(items) => {
                let mut tuple = formatter.debug_tuple("");
                for item in items {
                    tuple.field(item);
                }
                tuple.finish()
            }
            Self::Dict(entries) => formatter.debug_map().entries(entries).finish(),
            Self::OrderedDict(entries) => {
                formatter.write_str("OrderedDict ")?;
                formatter.debug_map().entries(entries).finish()
            }
            Self::Map(map) => fmt::Debug::fmt(map, formatter),
            Self::OrderedMap(map) => fmt::Debug::fmt(map, formatter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dict(entries: &[(&str, i64)]) -> HashMap<Key, Value> {
        entries
            .iter()
            .map(|(key, value)| (Key::from(*key), Value::from(*value)))
            .collect()
    }

    #[rstest]
    #[case(Value::Null, ValueKind::Scalar)]
    #[case(Value::from("text"), ValueKind::Scalar)]
    #[case(Value::List(vec![]), ValueKind::Sequence)]
    #[case(Value::Tuple(Box::new([])), ValueKind::Sequence)]
    #[case(Value::Dict(HashMap::new()), ValueKind::UnorderedMapping)]
    #[case(Value::Map(ImmutableMap::new()), ValueKind::UnorderedMapping)]
    #[case(Value::OrderedDict(IndexMap::new()), ValueKind::OrderedMapping)]
    #[case(Value::OrderedMap(OrderedImmutableMap::new()), ValueKind::OrderedMapping)]
    fn test_kind(#[case] value: Value, #[case] expected: ValueKind) {
        assert_eq!(value.kind(), expected);
    }

    #[rstest]
    fn test_mappings_compare_by_entries_across_variants() {
        let plain = Value::Dict(dict(&[("a", 0), ("b", 1)]));
        let frozen = Value::Map(dict(&[("b", 1), ("a", 0)]).into());
        let ordered = Value::OrderedMap(dict(&[("a", 0), ("b", 1)]).into());

        assert_eq!(plain, frozen);
        assert_eq!(frozen, ordered);
        assert_ne!(plain, Value::Dict(dict(&[("a", 0)])));
    }

    #[rstest]
    fn test_list_and_tuple_are_distinct() {
        let list = Value::List(vec![Value::from(1)]);
        let tuple = Value::Tuple(Box::new([Value::from(1)]));

        assert_ne!(list, tuple);
        assert_eq!(list.as_slice(), tuple.as_slice());
    }

    #[rstest]
    fn test_int_and_float_are_distinct() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[rstest]
    fn test_float_equality_is_reflexive_for_nan() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_eq!(Value::Float(0.0), Value::Float(-0.0));
        assert_ne!(Value::Float(f64::NAN), Value::Float(1.0));

        let nested = Value::Tuple(Box::new([Value::Float(f64::NAN)]));
        assert_eq!(nested, nested.clone());
    }

    #[rstest]
    fn test_debug_rendering() {
        let value = Value::Tuple(Box::new([
            Value::Null,
            Value::from("a"),
            Value::List(vec![Value::from(true)]),
        ]));
        assert_eq!(format!("{value:?}"), "(null, \"a\", [true])");

        let map = Value::OrderedMap([(Key::from("k"), Value::from(1))].into());
        assert_eq!(format!("{map:?}"), "<OrderedImmutableMap {\"k\": 1}>");
    }

    #[rstest]
    fn test_size() {
        assert_eq!(Value::from(vec![Value::Null, Value::Null]).size(), Some(2));
        assert_eq!(Value::Dict(dict(&[("a", 0)])).size(), Some(1));
        assert_eq!(Value::from(3).size(), None);
    }

    #[rstest]
    fn test_is_deeply_frozen_inspects_map_values() {
        let shallow = Value::Map([(Key::from("items"), Value::List(vec![]))].into());
        assert!(shallow.is_frozen());
        assert!(!shallow.is_deeply_frozen());
    }
}
