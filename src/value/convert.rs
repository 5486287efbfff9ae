//! Conversions into [`Key`] and [`Value`].

use std::collections::HashMap;

use indexmap::IndexMap;

use super::{HashableValue, Key, Value};
use crate::error::FrozenError;
use crate::map::{ImmutableMap, OrderedImmutableMap};

impl From<bool> for Key {
    fn from(boolean: bool) -> Self {
        Self::Bool(boolean)
    }
}

impl From<i64> for Key {
    fn from(integer: i64) -> Self {
        Self::Int(integer)
    }
}

impl From<i32> for Key {
    fn from(integer: i32) -> Self {
        Self::Int(i64::from(integer))
    }
}

impl From<&str> for Key {
    fn from(string: &str) -> Self {
        Self::Str(string.to_owned())
    }
}

impl From<String> for Key {
    fn from(string: String) -> Self {
        Self::Str(string)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Bool(boolean) => Self::Bool(boolean),
            Key::Int(integer) => Self::Int(integer),
            Key::Str(string) => Self::Str(string),
            Key::Frozen(hashable) => hashable.into_value(),
        }
    }
}

impl From<HashableValue> for Key {
    fn from(hashable: HashableValue) -> Self {
        match hashable.get() {
            Value::Bool(boolean) => Self::Bool(*boolean),
            Value::Int(integer) => Self::Int(*integer),
            Value::Str(string) => Self::Str(string.clone()),
            _ => Self::Frozen(hashable),
        }
    }
}

impl TryFrom<Value> for Key {
    type Error = FrozenError;

    /// Converts a hashable value into a key.
    ///
    /// # Errors
    ///
    /// Fails with [`FrozenError::Unhashable`] if a mutable container occurs
    /// anywhere inside `value`.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(boolean) => Ok(Self::Bool(boolean)),
            Value::Int(integer) => Ok(Self::Int(integer)),
            Value::Str(string) => Ok(Self::Str(string)),
            other => HashableValue::try_from(other).map(Self::Frozen),
        }
    }
}

impl From<bool> for Value {
    fn from(boolean: bool) -> Self {
        Self::Bool(boolean)
    }
}

impl From<i64> for Value {
    fn from(integer: i64) -> Self {
        Self::Int(integer)
    }
}

impl From<i32> for Value {
    fn from(integer: i32) -> Self {
        Self::Int(i64::from(integer))
    }
}

impl From<u32> for Value {
    fn from(integer: u32) -> Self {
        Self::Int(i64::from(integer))
    }
}

impl From<f64> for Value {
    fn from(float: f64) -> Self {
        Self::Float(float)
    }
}

impl From<&str> for Value {
    fn from(string: &str) -> Self {
        Self::Str(string.to_owned())
    }
}

impl From<String> for Value {
    fn from(string: String) -> Self {
        Self::Str(string)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Null, Into::into)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl From<Box<[Self]>> for Value {
    fn from(items: Box<[Self]>) -> Self {
        Self::Tuple(items)
    }
}

impl From<HashMap<Key, Self>> for Value {
    fn from(entries: HashMap<Key, Self>) -> Self {
        Self::Dict(entries)
    }
}

impl From<IndexMap<Key, Self>> for Value {
    fn from(entries: IndexMap<Key, Self>) -> Self {
        Self::OrderedDict(entries)
    }
}

impl From<ImmutableMap<Key, Self>> for Value {
    fn from(map: ImmutableMap<Key, Self>) -> Self {
        Self::Map(map)
    }
}

impl From<OrderedImmutableMap<Key, Self>> for Value {
    fn from(map: OrderedImmutableMap<Key, Self>) -> Self {
        Self::OrderedMap(map)
    }
}

/// Collects into a [`Value::List`].
impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::List(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Str("x".to_string()));
    }

    #[rstest]
    fn test_key_into_value() {
        assert_eq!(Value::from(Key::from(7)), Value::Int(7));
        assert_eq!(Value::from(Key::from(true)), Value::Bool(true));
    }

    #[rstest]
    #[case(Value::from(7), Key::Int(7))]
    #[case(Value::from("k"), Key::Str("k".to_string()))]
    #[case(Value::from(false), Key::Bool(false))]
    fn test_scalar_values_become_scalar_keys(#[case] value: Value, #[case] expected: Key) {
        assert_eq!(Key::try_from(value.clone()), Ok(expected.clone()));
        let hashable = HashableValue::try_from(value).unwrap();
        assert_eq!(Key::from(hashable), expected);
    }

    #[rstest]
    fn test_frozen_tuple_key_round_trips_through_value() {
        let tuple = Value::Tuple(Box::new([Value::from(1), Value::from(2.5)]));

        let key = Key::try_from(tuple.clone()).unwrap();

        assert!(matches!(key, Key::Frozen(_)));
        assert_eq!(Value::from(key), tuple);
    }

    #[rstest]
    fn test_mutable_value_is_not_a_key() {
        assert_eq!(
            Key::try_from(Value::from(vec![Value::Null])),
            Err(FrozenError::Unhashable { type_name: "list" })
        );
    }

    #[rstest]
    fn test_collect_into_list() {
        let value: Value = (1_i64..=3).map(Value::from).collect();
        assert_eq!(
            value,
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }
}
