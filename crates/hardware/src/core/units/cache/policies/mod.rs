//! Cache Replacement Policy.
//!
//! Victim selection for the set-associative cache. Only least-recently-used
//! replacement is modelled.

/// Least Recently Used replacement policy.
pub mod lru;

pub use lru::{LruClock, select_victim};
