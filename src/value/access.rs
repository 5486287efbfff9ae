//! Subscription and in-place mutation of dynamic values.

use super::{Key, Value};
use crate::error::FrozenError;
use crate::map::MutableMapping;

/// Resolves a possibly negative sequence index against `length`.
fn resolve_index(index: i64, length: usize) -> Result<usize, FrozenError> {
    let signed_length = i64::try_from(length).unwrap_or(i64::MAX);
    let position = if index < 0 {
        index.saturating_add(signed_length)
    } else {
        index
    };
    usize::try_from(position)
        .ok()
        .filter(|position| *position < length)
        .ok_or(FrozenError::IndexOutOfRange { index, length })
}

impl Value {
    /// Looks up `key` in a mapping, or an integer index in a sequence.
    ///
    /// Negative indices count from the end of a sequence.
    ///
    /// # Errors
    ///
    /// - [`FrozenError::KeyNotFound`] if a mapping lacks `key`.
    /// - [`FrozenError::IndexOutOfRange`] if a sequence index is out of range.
    /// - [`FrozenError::UnsupportedOperation`] for scalars, or for a sequence
    ///   indexed by a non-integer key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use frozenmap::{freeze, value::{Key, Value}};
    ///
    /// let value = freeze(Value::from(vec![Value::from("a"), Value::from("b")]));
    /// assert_eq!(value.get_item(&Key::from(-1)), Ok(&Value::from("b")));
    /// ```
    pub fn get_item(&self, key: &Key) -> Result<&Self, FrozenError> {
        if let Some(mapping) = self.as_mapping() {
            return mapping
                .get(key)
                .ok_or_else(|| FrozenError::key_not_found(key));
        }

        match (self, key) {
            (Self::List(items), Key::Int(index)) => Ok(&items[resolve_index(*index, items.len())?]),
            (Self::Tuple(items), Key::Int(index)) => Ok(&items[resolve_index(*index, items.len())?]),
            (Self::List(_) | Self::Tuple(_), _) => Err(FrozenError::unsupported(
                self.type_name(),
                "non-integer indexing",
            )),
            _ => Err(FrozenError::unsupported(self.type_name(), "subscription")),
        }
    }
}

/// Mutable containers (`List`, `Dict`, `OrderedDict`) accept mutation; every
/// other variant rejects it with [`FrozenError::UnsupportedOperation`].
///
/// # Examples
///
/// ```rust
/// use frozenmap::{freeze, map::MutableMapping, value::{Key, Value}};
/// use std::collections::HashMap;
///
/// let mut plain = Value::from(HashMap::new());
/// plain.set_item(Key::from("a"), Value::from(1)).unwrap();
///
/// let mut frozen = freeze(plain.clone());
/// let error = frozen.set_item(Key::from("a"), Value::from(2)).unwrap_err();
/// assert_eq!(error.to_string(), "'ImmutableMap' object does not support item assignment");
/// ```
impl MutableMapping<Key, Value> for Value {
    fn set_item(&mut self, key: Key, value: Value) -> Result<Option<Value>, FrozenError> {
        let type_name = self.type_name();
        match self {
            Self::Dict(entries) => Ok(entries.insert(key, value)),
            Self::OrderedDict(entries) => Ok(entries.insert(key, value)),
            Self::List(items) => match key {
                Key::Int(index) => {
                    let position = resolve_index(index, items.len())?;
                    Ok(Some(std::mem::replace(&mut items[position], value)))
                }
                _ => Err(FrozenError::unsupported(type_name, "non-integer indexing")),
            },
            _ => Err(FrozenError::unsupported(type_name, "item assignment")),
        }
    }

    fn del_item(&mut self, key: &Key) -> Result<Value, FrozenError> {
        let type_name = self.type_name();
        match self {
            Self::Dict(entries) => entries
                .remove(key)
                .ok_or_else(|| FrozenError::key_not_found(key)),
            Self::OrderedDict(entries) => entries
                .shift_remove(key)
                .ok_or_else(|| FrozenError::key_not_found(key)),
            Self::List(items) => match key {
                Key::Int(index) => {
                    let position = resolve_index(*index, items.len())?;
                    Ok(items.remove(position))
                }
                _ => Err(FrozenError::unsupported(type_name, "non-integer indexing")),
            },
            _ => Err(FrozenError::unsupported(type_name, "item deletion")),
        }
    }

    fn clear_items(&mut self) -> Result<(), FrozenError> {
        let type_name = self.type_name();
        match self {
            Self::Dict(entries) => entries.clear(),
            Self::OrderedDict(entries) => entries.clear(),
            Self::List(items) => items.clear(),
            _ => return Err(FrozenError::unsupported(type_name, "clearing")),
        }
        Ok(())
    }

    fn update_items<I>(&mut self, pairs: I) -> Result<(), FrozenError>
    where
        I: IntoIterator<Item = (Key, Value)>,
    {
        let type_name = self.type_name();
        match self {
            Self::Dict(entries) => entries.extend(pairs),
            Self::OrderedDict(entries) => entries.extend(pairs),
            _ => return Err(FrozenError::unsupported(type_name, "in-place update")),
        }
        Ok(())
    }
}
