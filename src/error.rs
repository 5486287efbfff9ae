//! Error types for immutable maps and dynamic values.
//!
//! Every failure is reported to the caller immediately. Nothing in this
//! crate retries or masks an error: lookups of absent keys, mutation of a
//! frozen container and hashing of a mutable container are all contract
//! violations by the caller.

use std::fmt;

/// Represents the errors raised by [`ImmutableMap`](crate::map::ImmutableMap),
/// [`Value`](crate::value::Value) and the freeze/unfreeze conversions.
///
/// # Examples
///
/// ```rust
/// use frozenmap::FrozenError;
///
/// let error = FrozenError::UnsupportedOperation {
///     type_name: "ImmutableMap",
///     operation: "item assignment",
/// };
/// assert_eq!(
///     error.to_string(),
///     "'ImmutableMap' object does not support item assignment"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrozenError {
    /// A lookup was made for a key that is not present.
    KeyNotFound {
        /// Debug rendering of the missing key.
        key: String,
    },
    /// A mutation (or another operation the receiver does not offer) was attempted.
    UnsupportedOperation {
        /// The type name of the receiver.
        type_name: &'static str,
        /// The operation that was attempted, e.g. `"item assignment"`.
        operation: &'static str,
    },
    /// A value that cannot be hashed was reached while computing a hash.
    Unhashable {
        /// The type name of the offending value.
        type_name: &'static str,
    },
    /// A sequence index fell outside the sequence.
    IndexOutOfRange {
        /// The requested index.
        index: i64,
        /// The length of the sequence.
        length: usize,
    },
}

impl FrozenError {
    /// Creates a [`FrozenError::KeyNotFound`] from any debuggable key.
    pub fn key_not_found<Q: fmt::Debug + ?Sized>(key: &Q) -> Self {
        Self::KeyNotFound {
            key: format!("{key:?}"),
        }
    }

    /// Creates a [`FrozenError::UnsupportedOperation`].
    pub const fn unsupported(type_name: &'static str, operation: &'static str) -> Self {
        Self::UnsupportedOperation {
            type_name,
            operation,
        }
    }

    /// Returns `true` if this is a [`FrozenError::UnsupportedOperation`].
    pub const fn is_unsupported_operation(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }
}

impl fmt::Display for FrozenError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyNotFound { key } => write!(formatter, "key not found: {key}"),
            Self::UnsupportedOperation {
                type_name,
                operation,
            } => write!(
                formatter,
                "'{type_name}' object does not support {operation}"
            ),
            Self::Unhashable { type_name } => write!(formatter, "unhashable type: '{type_name}'"),
            Self::IndexOutOfRange { index, length } => write!(
                formatter,
                "index {index} out of range for sequence of length {length}"
            ),
        }
    }
}

impl std::error::Error for FrozenError {}
