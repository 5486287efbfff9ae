//! Deep conversion between mutable and frozen [`Value`] trees.
//!
//! Both functions dispatch on the closed set of container kinds described
//! by [`ValueKind`](crate::value::ValueKind):
//!
//! | Input                       | `freeze`       | `unfreeze`    |
//! |-----------------------------|----------------|---------------|
//! | `List`, `Tuple`             | `Tuple`        | `List`        |
//! | `OrderedDict`, `OrderedMap` | `OrderedMap`   | `OrderedDict` |
//! | `Dict`, `Map`               | `Map`          | `Dict`        |
//! | scalars                     | unchanged      | unchanged     |
//!
//! Values are consumed, so containers are rebuilt by moving their elements.
//! The entries of a frozen map are only cloned when another handle still
//! shares them.

use crate::map::{Backing, ImmutableMap};
use crate::value::{Key, Value};

/// Recursively converts `value` into its frozen equivalent.
///
/// Sequences become tuples and mappings become [`ImmutableMap`]s of the
/// matching variant, with every nested element frozen as well. Maps that
/// are already frozen are rebuilt with frozen values, so the result never
/// contains a mutable container. Scalars are returned unchanged.
///
/// Freezing is idempotent: `freeze(freeze(x)) == freeze(x)`.
///
/// # Examples
///
/// ```rust
/// use frozenmap::{freeze, value::{Key, Value}};
/// use indexmap::IndexMap;
///
/// let settings = Value::from(IndexMap::from([
///     (Key::from("hosts"), Value::from(vec![Value::from("a"), Value::from("b")])),
///     (Key::from("retries"), Value::from(3)),
/// ]));
///
/// let frozen = freeze(settings);
/// assert_eq!(frozen.type_name(), "OrderedImmutableMap");
/// assert_eq!(frozen.get_item(&Key::from("hosts")).unwrap().type_name(), "tuple");
/// assert!(frozen.is_deeply_frozen());
/// ```
#[must_use]
pub fn freeze(value: Value) -> Value {
    tracing::trace!(kind = ?value.kind(), type_name = value.type_name(), "freeze");
    match value {
        Value::List(items) => Value::Tuple(items.into_iter().map(freeze).collect()),
        Value::Tuple(items) => Value::Tuple(items.into_vec().into_iter().map(freeze).collect()),
        Value::OrderedDict(entries) => Value::OrderedMap(freeze_entries(entries)),
        Value::OrderedMap(map) => Value::OrderedMap(freeze_entries(map)),
        Value::Dict(entries) => Value::Map(freeze_entries(entries)),
        Value::Map(map) => Value::Map(freeze_entries(map)),
        scalar => scalar,
    }
}

/// Recursively converts `value` back into mutable containers.
///
/// Tuples and lists become lists, ordered mappings become `OrderedDict`
/// and unordered mappings become `Dict`. Scalars are returned unchanged.
///
/// For any tree `x` built from lists, dicts, ordered dicts and scalars,
/// `unfreeze(freeze(x)) == x`. Tuples in the input come back as lists.
///
/// # Examples
///
/// ```rust
/// use frozenmap::{freeze, unfreeze, value::{Key, Value}};
/// use std::collections::HashMap;
///
/// let original = Value::from(HashMap::from([(
///     Key::from("ports"),
///     Value::from(vec![Value::from(80), Value::from(443)]),
/// )]));
///
/// let round_tripped = unfreeze(freeze(original.clone()));
/// assert_eq!(round_tripped, original);
/// assert_eq!(round_tripped.type_name(), "dict");
/// ```
#[must_use]
pub fn unfreeze(value: Value) -> Value {
    tracing::trace!(kind = ?value.kind(), type_name = value.type_name(), "unfreeze");
    match value {
        Value::List(items) => Value::List(items.into_iter().map(unfreeze).collect()),
        Value::Tuple(items) => Value::List(items.into_vec().into_iter().map(unfreeze).collect()),
        Value::OrderedMap(map) => Value::OrderedDict(unfreeze_entries(map)),
        Value::OrderedDict(entries) => Value::OrderedDict(unfreeze_entries(entries)),
        Value::Map(map) => Value::Dict(unfreeze_entries(map)),
        Value::Dict(entries) => Value::Dict(unfreeze_entries(entries)),
        scalar => scalar,
    }
}

fn freeze_entries<M, I>(entries: I) -> ImmutableMap<Key, Value, M>
where
    M: Backing<Key, Value>,
    I: IntoIterator<Item = (Key, Value)>,
{
    entries
        .into_iter()
        .map(|(key, value)| (key, freeze(value)))
        .collect()
}

fn unfreeze_entries<C, I>(entries: I) -> C
where
    C: FromIterator<(Key, Value)>,
    I: IntoIterator<Item = (Key, Value)>,
{
    entries
        .into_iter()
        .map(|(key, value)| (key, unfreeze(value)))
        .collect()
}
