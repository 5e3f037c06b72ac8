//! Set-associative writeback cache model.
//!
//! This crate implements a functional model of a CPU data cache with the following:
//! 1. **Addressing:** Decoding of flat 64-bit physical addresses into tag, set index and block offset.
//! 2. **Engine:** Set-associative lookup, LRU replacement, writeback (dirty) tracking and eviction accounting.
//! 3. **Data:** Byte and word accessors over resident blocks.
//! 4. **Checkpoints:** Independent deep snapshots for save/rollback exploration.
//! 5. **Simulation:** Trace parsing and replay, configuration, and statistics.
//!
//! ```
//! use wbcache_core::{Cache, CacheConfig, Operation};
//!
//! let config = CacheConfig { set_bits: 2, block_bits: 3, associativity: 1, depth: 0 };
//! let mut cache = Cache::from_config(&config).unwrap();
//!
//! cache.access(0x00, Operation::Write);
//! cache.access(0x20, Operation::Write);
//! cache.access(0x20, Operation::Read);
//!
//! let stats = cache.stats();
//! assert_eq!((stats.hits, stats.misses, stats.dirty_evictions), (1, 2, 1));
//! ```

/// Common types (address decoding, operations, errors, constants).
pub mod common;
/// Cache configuration and validated geometry.
pub mod config;
/// Cache engine (storage, lookup, replacement, accessors, checkpoints).
pub mod core;
/// Trace parsing and replay.
pub mod sim;
/// Hit, miss and eviction counters.
pub mod stats;

/// Memory operation kind; `Operation::Read` or `Operation::Write`.
pub use crate::common::Operation;
/// Raw configuration; validate into a [`Geometry`] or pass to [`Cache::from_config`].
pub use crate::config::{CacheConfig, Geometry};
/// The cache model; construct with `Cache::new` or `Cache::from_config`.
pub use crate::core::Cache;
/// Result of a single access.
pub use crate::core::units::cache::line::AccessOutcome;
/// Aggregate counters.
pub use crate::stats::CacheStats;
