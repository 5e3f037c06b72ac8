//! Cache statistics collection.
//!
//! This module tracks the aggregate outcome of every access replayed against a cache. It provides:
//! 1. **Lookup counters:** Hits and misses (exactly one per access).
//! 2. **Eviction counters:** Dirty and clean evictions (only when a valid line is replaced).
//! 3. **Derived metrics:** Total accesses, total evictions and hit rate.
//!
//! Formatting a summary for the user is left to the caller; the counters
//! serialize to JSON through `serde`.

use serde::Serialize;

/// Hit, miss and eviction counters for one cache instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that did not.
    pub misses: u64,
    /// Misses that replaced a valid, dirty line (a writeback).
    pub dirty_evictions: u64,
    /// Misses that replaced a valid, clean line.
    pub clean_evictions: u64,
}

impl CacheStats {
    /// Total accesses recorded (`hits + misses`).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Total evictions of valid lines, dirty or clean.
    pub const fn evictions(&self) -> u64 {
        self.dirty_evictions + self.clean_evictions
    }

    /// Fraction of accesses that hit, or `0.0` before the first access.
    pub fn hit_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    /// Number of misses that filled a previously invalid line.
    pub const fn cold_fills(&self) -> u64 {
        self.misses.saturating_sub(self.evictions())
    }
}
