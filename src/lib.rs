#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// A hash map implemented on top of the hopscotch hash table.
///
/// This module provides a `HashMap` that wraps the `HashTable` and exposes
/// a standard key-value interface with configurable hashers.
pub mod hash_map;

/// The core hopscotch hash table.
///
/// This module provides the prime-capacity, bounded-probe slot array that
/// the set and map wrappers are built on. Operations take a precomputed
/// hash and an equality predicate instead of a hasher.
pub mod hash_table;

/// A hash set implemented on top of the hopscotch hash table.
///
/// This module provides a `HashSet` that wraps the `HashTable` and exposes
/// a standard set interface with configurable hashers.
pub mod hash_set;

pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_set::HashSet;
pub use hash_table::HashTable;
pub use hash_table::Insert;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hash builder used by `HashSet` and `HashMap` when none is
        /// supplied: foldhash's fast, randomly seeded state.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hash builder used by `HashSet` and `HashMap` when none is
        /// supplied: the standard library's randomly seeded SipHash state.
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    } else {
        /// Placeholder hash builder. Without the `foldhash` or `std`
        /// feature there is no default; construct sets and maps through
        /// `with_hasher` instead.
        pub enum DefaultHashBuilder {}
    }
}
