//! Frozen values that can be stored in hash-based collections.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::Value;
use crate::error::FrozenError;

/// A [`Value`] that is known to be hashable, together with its hash.
///
/// `Value` itself does not implement [`Hash`] because mutable containers
/// have no stable hash. `HashableValue` is the checked form: it can only be
/// built from a value whose [`try_hash`](Value::try_hash) succeeds, so it
/// can be a member of a `HashSet` or the key of a `HashMap`. Equality is the
/// equality of the wrapped values, which agrees with the stored hash.
///
/// # Examples
///
/// ```rust
/// use frozenmap::freeze;
/// use frozenmap::value::{HashableValue, Key, Value};
/// use std::collections::{HashMap, HashSet};
///
/// let config = Value::from(HashMap::from([
///     (Key::from("host"), Value::from("localhost")),
///     (Key::from("port"), Value::from(8080)),
/// ]));
///
/// let mut seen = HashSet::new();
/// seen.insert(HashableValue::try_from(freeze(config.clone())).unwrap());
///
/// assert!(seen.contains(&HashableValue::try_from(freeze(config)).unwrap()));
/// ```
#[derive(Clone)]
pub struct HashableValue {
    value: Value,
    hash: u64,
}

impl HashableValue {
    /// Returns the wrapped value.
    #[must_use]
    pub const fn get(&self) -> &Value {
        &self.value
    }

    /// Unwraps the value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Returns the hash computed when the wrapper was built.
    #[must_use]
    pub const fn hash_code(&self) -> u64 {
        self.hash
    }
}

impl TryFrom<Value> for HashableValue {
    type Error = FrozenError;

    /// # Errors
    ///
    /// Fails with [`FrozenError::Unhashable`] if a mutable container occurs
    /// anywhere inside `value`.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let hash = value.try_hash()?;
        Ok(Self { value, hash })
    }
}

impl From<HashableValue> for Value {
    fn from(hashable: HashableValue) -> Self {
        hashable.value
    }
}

impl AsRef<Value> for HashableValue {
    fn as_ref(&self) -> &Value {
        &self.value
    }
}

impl PartialEq for HashableValue {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.value == other.value
    }
}

impl Eq for HashableValue {}

impl Hash for HashableValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for HashableValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, formatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freeze;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case(Value::from(vec![Value::from(1)]), "list")]
    #[case(Value::Tuple(Box::new([Value::Dict(Default::default())])), "dict")]
    fn test_mutable_content_is_rejected(#[case] value: Value, #[case] type_name: &'static str) {
        assert_eq!(
            HashableValue::try_from(value),
            Err(FrozenError::Unhashable { type_name })
        );
    }

    #[rstest]
    fn test_hash_code_matches_try_hash() {
        let value = Value::Tuple(Box::new([Value::from("a"), Value::from(2.5)]));
        let expected = value.try_hash().unwrap();

        let hashable = HashableValue::try_from(value.clone()).unwrap();

        assert_eq!(hashable.hash_code(), expected);
        assert_eq!(hashable.get(), &value);
        assert_eq!(hashable.into_value(), value);
    }

    #[rstest]
    fn test_nan_member_is_found_again() {
        let nan = || freeze(Value::from(vec![Value::Float(f64::NAN), Value::from(1)]));

        let set: HashSet<HashableValue> = [HashableValue::try_from(nan()).unwrap()].into();

        assert!(set.contains(&HashableValue::try_from(nan()).unwrap()));
    }

    #[rstest]
    fn test_signed_zeros_collapse_to_one_member() {
        let set: HashSet<HashableValue> = [Value::Float(0.0), Value::Float(-0.0)]
            .into_iter()
            .map(|value| HashableValue::try_from(value).unwrap())
            .collect();

        assert_eq!(set.len(), 1);
    }

    #[rstest]
    fn test_debug_shows_the_value() {
        let hashable =
            HashableValue::try_from(Value::Tuple(Box::new([Value::from(1), Value::from("a")])))
                .unwrap();
        assert_eq!(format!("{hashable:?}"), "(1, \"a\")");
    }
}
