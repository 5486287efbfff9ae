//! Fallible hashing of dynamic values.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::Value;
use crate::error::FrozenError;
use crate::map::pair_hash;

/// Distinguishes scalars of different variants that share a bit pattern.
#[derive(Hash)]
enum Tag {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Tuple,
}

fn tagged_hash<T: Hash + ?Sized>(tag: Tag, payload: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    tag.hash(&mut hasher);
    payload.hash(&mut hasher);
    hasher.finish()
}

impl Value {
    /// Computes a hash of this value.
    ///
    /// Frozen values are hashable; mutable containers are not. Equal
    /// hashable values produce equal hashes, so a frozen `Map` and a frozen
    /// `OrderedMap` with the same entries hash identically. Frozen maps
    /// cache their hash after the first successful computation.
    ///
    /// # Errors
    ///
    /// Fails with [`FrozenError::Unhashable`] if a `List`, `Dict` or
    /// `OrderedDict` occurs anywhere inside the value. The failure surfaces
    /// here, not when the value was built.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use frozenmap::{FrozenError, freeze, value::Value};
    ///
    /// let list = Value::from(vec![Value::from(1), Value::from(2)]);
    /// assert_eq!(list.try_hash(), Err(FrozenError::Unhashable { type_name: "list" }));
    ///
    /// let tuple = freeze(list);
    /// assert!(tuple.try_hash().is_ok());
    /// ```
    pub fn try_hash(&self) -> Result<u64, FrozenError> {
        match self {
            Self::Null => Ok(tagged_hash(Tag::Null, &())),
            Self::Bool(boolean) => Ok(tagged_hash(Tag::Bool, boolean)),
            Self::Int(integer) => Ok(tagged_hash(Tag::Int, integer)),
            // 0.0 and -0.0 compare equal and must hash equally.
            Self::Float(float) if *float == 0.0 => Ok(tagged_hash(Tag::Float, &0.0_f64.to_bits())),
            Self::Float(float) => Ok(tagged_hash(Tag::Float, &float.to_bits())),
            Self::Str(string) => Ok(tagged_hash(Tag::Str, string.as_str())),
            Self::Tuple(items) => {
                let mut hasher = DefaultHasher::new();
                Tag::Tuple.hash(&mut hasher);
                items.len().hash(&mut hasher);
                for item in items {
                    hasher.write_u64(item.try_hash()?);
                }
                Ok(hasher.finish())
            }
            Self::Map(map) => {
                map.try_fingerprint_with(|key, value| Ok(pair_hash(key, &value.try_hash()?)))
            }
            Self::OrderedMap(map) => {
                map.try_fingerprint_with(|key, value| Ok(pair_hash(key, &value.try_hash()?)))
            }
            Self::List(_) | Self::Dict(_) | Self::OrderedDict(_) => {
                tracing::debug!(type_name = self.type_name(), "refused to hash mutable container");
                Err(FrozenError::Unhashable {
                    type_name: self.type_name(),
                })
            }
        }
    }

    /// Returns `true` if [`try_hash`](Self::try_hash) would succeed.
    #[must_use]
    pub fn is_hashable(&self) -> bool {
        match self {
            Self::List(_) | Self::Dict(_) | Self::OrderedDict(_) => false,
            Self::Tuple(items) => items.iter().all(Self::is_hashable),
            Self::Map(map) => map.values().all(Self::is_hashable),
            Self::OrderedMap(map) => map.values().all(Self::is_hashable),
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::Str(_) => true,
        }
    }
}
