//! Immutable, hashable mappings.
//!
//! This module provides [`ImmutableMap`], a read-only associative container,
//! and its order-preserving variant [`OrderedImmutableMap`]:
//!
//! - [`ImmutableMap`]: backed by a `HashMap`, iteration order unspecified
//! - [`OrderedImmutableMap`]: backed by an `IndexMap`, iteration follows
//!   construction order
//!
//! Both variants share one implementation parameterised by their
//! [`Backing`] storage. They compare equal whenever they hold the same set
//! of entries, and they hash equally in that case, so either variant can be
//! used as a key in a `HashMap` or as a member of a `HashSet`.
//!
//! # Examples
//!
//! ```rust
//! use frozenmap::map::{ImmutableMap, OrderedImmutableMap};
//! use std::collections::HashSet;
//!
//! let unordered: ImmutableMap<&str, i32> = [("a", 0), ("b", 1)].into();
//! let ordered: OrderedImmutableMap<&str, i32> = [("b", 1), ("a", 0)].into();
//!
//! assert_eq!(unordered, ordered);
//!
//! let mut seen = HashSet::new();
//! seen.insert(unordered.clone());
//! assert!(seen.contains(&unordered));
//! ```
//!
//! # Mutation
//!
//! There is no `&mut` API on either variant. Code that is generic over
//! [`MutableMapping`] observes an
//! [`UnsupportedOperation`](crate::FrozenError::UnsupportedOperation) error
//! instead.

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled (default), this is `std::sync::Arc`,
/// and maps are `Send + Sync` whenever their keys and values are.
///
/// When the `arc` feature is disabled, this is `std::rc::Rc`, which is
/// cheaper to clone but confines maps to a single thread.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod backing;
mod builder;
mod immutable;
mod macros;
mod mutable;

pub use backing::Backing;
pub use backing::DefaultHashBuilder;
pub use backing::HashStorage;
pub use backing::OrderedStorage;
pub use builder::MapBuilder;
pub use immutable::ImmutableMap;
pub use immutable::OrderedImmutableMap;
pub use mutable::MutableMapping;

pub(crate) use immutable::pair_hash;

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(ImmutableMap<String, i32>: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(OrderedImmutableMap<String, i32>: Send, Sync);
#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(ImmutableMap<String, i32>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
