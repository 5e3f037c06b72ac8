//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the valid line whose last access is oldest. Recency is
//! tracked with timestamps rather than a per-set usage stack: every hit and
//! every fill draws a fresh stamp from a clock owned by the cache instance,
//! and the line with the smallest stamp in a full set is the victim.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `tick()`: O(1)
//!   - `select_victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** O(S × W), one 64-bit stamp per line
//! - **Best Case:** Working sets that fit within each set's associativity
//! - **Worst Case:** Cyclic scans one block larger than a set (every access misses)

use crate::common::constants::LRU_NEVER_USED;
use crate::core::units::cache::line::CacheLine;

/// Per-cache monotonic recency clock.
///
/// Stamps are strictly increasing and start one above [`LRU_NEVER_USED`], so
/// no two accesses share a stamp and a never-touched line is always oldest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LruClock {
    now: u64,
}

impl LruClock {
    /// Creates a clock that has not issued any stamps.
    pub const fn new() -> Self {
        Self {
            now: LRU_NEVER_USED,
        }
    }

    /// Advances the clock and returns the new stamp.
    #[inline]
    pub const fn tick(&mut self) -> u64 {
        self.now += 1;
        self.now
    }

    /// The most recently issued stamp ([`LRU_NEVER_USED`] if none).
    pub const fn now(&self) -> u64 {
        self.now
    }
}

/// Chooses the way to (re)use for a miss in one set.
///
/// The first invalid line wins (a pure fill). Otherwise the valid line with
/// the smallest LRU stamp is chosen. Selection is read-only.
///
/// An empty set selects way 0; callers guarantee at least one way.
pub fn select_victim(lines: &[CacheLine]) -> usize {
    if let Some(way) = lines.iter().position(|line| !line.is_valid()) {
        return way;
    }
    lines
        .iter()
        .enumerate()
        .min_by_key(|(_, line)| line.lru())
        .map_or(0, |(way, _)| way)
}
