//! # frozenmap
//!
//! Immutable, hashable mappings for Rust, and deep conversion of nested
//! values into their frozen form.
//!
//! ## Overview
//!
//! - **[`ImmutableMap`](map::ImmutableMap)**: a read-only mapping built once
//!   from any number of sources. It is hashable through a cached,
//!   order-independent fingerprint and can be used as a key in other maps.
//! - **[`OrderedImmutableMap`](map::OrderedImmutableMap)**: the same mapping,
//!   iterating in construction order. It compares and hashes equal to an
//!   unordered map with the same entries.
//! - **[`freeze`] / [`unfreeze`]**: recursive conversion of a [`Value`](value::Value)
//!   tree between mutable containers (lists, dicts) and their frozen
//!   counterparts (tuples, immutable maps).
//!
//! ## Feature Flags
//!
//! - `arc` (default): share entries through `Arc`, making maps `Send + Sync`
//! - `serde`: `Serialize` / `Deserialize` for maps, keys and values
//! - `fxhash`: use `rustc-hash` as the hasher of the unordered storage
//! - `ahash`: use `ahash` as the hasher of the unordered storage
//! - `full`: `arc` and `serde`
//!
//! ## Example
//!
//! ```rust
//! use frozenmap::prelude::*;
//! use std::collections::HashMap;
//!
//! let defaults = immutable_map! { "retries" => 3, "timeout" => 30 };
//! let tuned = defaults.copy([("timeout", 5)]);
//!
//! assert_eq!(defaults.get("timeout"), Some(&30));
//! assert_eq!(tuned.get("timeout"), Some(&5));
//!
//! let mut cache = HashMap::new();
//! cache.insert(tuned.clone(), "fast profile");
//! assert_eq!(cache.get(&tuned), Some(&"fast profile"));
//!
//! let config = Value::from(vec![Value::from(1), Value::from(2)]);
//! assert_eq!(unfreeze(freeze(config.clone())), config);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use frozenmap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::FrozenError;
    pub use crate::freeze::{freeze, unfreeze};
    pub use crate::map::{ImmutableMap, MapBuilder, MutableMapping, OrderedImmutableMap};
    pub use crate::value::{HashableValue, Key, Value, ValueKind};
    pub use crate::{immutable_map, ordered_immutable_map};
}

pub mod map;
pub mod value;

mod error;
mod freeze;

pub use error::FrozenError;
pub use freeze::{freeze, unfreeze};
