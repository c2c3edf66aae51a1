#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// The key capability contract and its implementations for common types.
///
/// This module provides the [`Hashable`] trait every key must implement, plus
/// the [`HashKey`] adapter for types that already implement `Hash + Eq`.
pub mod hashable;

pub mod hash_table;

/// A hash set built on the chained hash table.
///
/// This module provides a `HashSet` that wraps the `HashTable`, storing
/// `true` for every member.
pub mod hash_set;

#[cfg(any(feature = "foldhash", feature = "std"))]
pub use hashable::HashKey;
pub use hash_set::HashSet;
pub use hash_table::HashTable;
pub use hashable::Hashable;
