//! Cache engine implementation.
//!
//! This module contains the functional units of the cache model: line
//! storage, lookup, LRU replacement, data access and checkpointing.

/// Functional units (the set-associative cache).
pub mod units;

pub use self::units::cache::Cache;
