//! Set-Associative Writeback Cache.
//!
//! This module implements a functional model of a set-associative writeback
//! cache with LRU replacement. It models residency, dirtiness and block
//! contents, and counts hits, misses and dirty/clean evictions. Timing is not
//! modelled.
//!
//! Lines are stored set-major in a single vector: set `i` occupies slots
//! `i * E .. (i + 1) * E`.

/// Byte and word accessors over resident lines.
pub mod data;

/// Cache lines, line positions and eviction records.
pub mod line;

/// Replacement policy (LRU).
pub mod policies;

use tracing::{debug, trace};

use self::line::{AccessOutcome, CacheLine, EvictedLine, Eviction, LineId};
use self::policies::{LruClock, select_victim};
use crate::common::data::Operation;
use crate::common::error::CacheError;
use crate::config::{CacheConfig, Geometry};
use crate::stats::CacheStats;

/// Cache model: geometry, line storage, recency clock and counters.
///
/// Every instance owns all of its state, including the LRU clock and the
/// statistics, so independent caches never influence each other. Storage is
/// released when the cache is dropped.
#[derive(Clone, Debug)]
pub struct Cache {
    geometry: Geometry,
    lines: Vec<CacheLine>,
    clock: LruClock,
    stats: CacheStats,
}

impl Cache {
    /// Allocates a cache with every line invalid, clean and zero-filled.
    ///
    /// Aborts if the host cannot provide the storage; see
    /// [`try_new`](Self::try_new) for a fallible version.
    pub fn new(geometry: Geometry) -> Self {
        let lines = vec![CacheLine::empty(geometry.block_size()); geometry.num_lines()];
        Self::with_lines(geometry, lines)
    }

    /// Allocates a cache like [`new`](Self::new), reporting allocation failure.
    ///
    /// # Errors
    ///
    /// [`CacheError::StorageOverflow`] if the line storage cannot be allocated.
    pub fn try_new(geometry: Geometry) -> Result<Self, CacheError> {
        let overflow = || CacheError::StorageOverflow {
            set_bits: geometry.set_bits(),
            block_bits: geometry.block_bits(),
            associativity: geometry.associativity(),
        };
        let mut lines = Vec::new();
        lines
            .try_reserve_exact(geometry.num_lines())
            .map_err(|_| overflow())?;
        for _ in 0..geometry.num_lines() {
            lines.push(CacheLine::try_empty(geometry.block_size()).ok_or_else(overflow)?);
        }
        Ok(Self::with_lines(geometry, lines))
    }

    fn with_lines(geometry: Geometry, lines: Vec<CacheLine>) -> Self {
        debug!(
            sets = geometry.num_sets(),
            ways = geometry.associativity(),
            block_bytes = geometry.block_size(),
            "cache created"
        );
        Self {
            geometry,
            lines,
            clock: LruClock::new(),
            stats: CacheStats::default(),
        }
    }

    /// Validates `config` and allocates a cache for it.
    ///
    /// # Errors
    ///
    /// Any configuration error reported by [`CacheConfig::validate`], or
    /// [`CacheError::StorageOverflow`] if the storage cannot be allocated.
    pub fn from_config(config: &CacheConfig) -> Result<Self, CacheError> {
        config.validate().and_then(Self::try_new)
    }

    /// The cache's immutable geometry.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Aggregate counters.
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of hits recorded.
    pub const fn hit_count(&self) -> u64 {
        self.stats.hits
    }

    /// Number of misses recorded.
    pub const fn miss_count(&self) -> u64 {
        self.stats.misses
    }

    /// Number of valid dirty lines replaced.
    pub const fn dirty_eviction_count(&self) -> u64 {
        self.stats.dirty_evictions
    }

    /// Number of valid clean lines replaced.
    pub const fn clean_eviction_count(&self) -> u64 {
        self.stats.clean_evictions
    }

    /// Most recent LRU stamp handed out by this cache.
    pub const fn lru_clock(&self) -> u64 {
        self.clock.now()
    }

    #[inline(always)]
    const fn slot(&self, id: LineId) -> usize {
        id.set * self.geometry.associativity() + id.way
    }

    /// The lines of one set, or `None` if `set_index` is out of range.
    pub fn set(&self, set_index: usize) -> Option<&[CacheLine]> {
        let ways = self.geometry.associativity();
        let base = set_index.checked_mul(ways)?;
        self.lines.get(base..base.checked_add(ways)?)
    }

    /// The line at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is outside the cache.
    pub fn line(&self, id: LineId) -> &CacheLine {
        assert!(id.way < self.geometry.associativity(), "way {} out of range", id.way);
        &self.lines[self.slot(id)]
    }

    fn line_mut(&mut self, id: LineId) -> &mut CacheLine {
        let slot = self.slot(id);
        &mut self.lines[slot]
    }

    /// Every valid line with its position, in set-major order.
    pub fn resident_lines(&self) -> impl Iterator<Item = (LineId, &CacheLine)> + '_ {
        let ways = self.geometry.associativity();
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.valid)
            .map(move |(slot, line)| {
                (
                    LineId {
                        set: slot / ways,
                        way: slot % ways,
                    },
                    line,
                )
            })
    }

    /// Finds the valid line holding `addr`'s block, if any.
    ///
    /// Pure lookup: no counters or recency state change.
    pub fn find_resident_line(&self, addr: u64) -> Option<LineId> {
        let decoded = self.geometry.layout().decode(addr);
        let set = self.set(decoded.set_index)?;
        set.iter()
            .position(|line| line.valid && line.tag == decoded.tag)
            .map(|way| LineId {
                set: decoded.set_index,
                way,
            })
    }

    /// Chooses the line a miss in `set_index` would fill.
    ///
    /// Read-only, so it may be called speculatively.
    ///
    /// # Panics
    ///
    /// Panics if `set_index` is not below the number of sets.
    pub fn select_victim(&self, set_index: usize) -> LineId {
        let Some(set) = self.set(set_index) else {
            panic!(
                "set {set_index} out of range (cache has {} sets)",
                self.geometry.num_sets()
            );
        };
        LineId {
            set: set_index,
            way: select_victim(set),
        }
    }

    /// Looks `addr` up and updates the hit/miss counters.
    ///
    /// On a hit the line's recency stamp is refreshed and a write marks it
    /// dirty; dirtiness then persists until the line is replaced. On a miss
    /// only the miss counter changes; the caller follows up with
    /// [`fill_on_miss`](Self::fill_on_miss).
    pub fn record_access(&mut self, addr: u64, operation: Operation) -> bool {
        let tag = self.geometry.layout().tag(addr);
        let Some(id) = self.find_resident_line(addr) else {
            self.stats.misses += 1;
            trace!(addr = format_args!("{addr:#x}"), tag, %operation, "miss");
            return false;
        };

        self.stats.hits += 1;
        let stamp = self.clock.tick();
        let line = self.line_mut(id);
        line.lru = stamp;
        if operation.is_write() {
            line.dirty = true;
        }
        trace!(
            addr = format_args!("{addr:#x}"),
            tag,
            %operation,
            set = id.set,
            way = id.way,
            "hit"
        );
        true
    }

    /// Installs `addr`'s block after a recorded miss and returns what it replaced.
    ///
    /// The victim comes from [`select_victim`](Self::select_victim). Its
    /// previous state is captured, then it is overwritten with the new tag, a
    /// fresh recency stamp and `dirty = operation.is_write()`. If
    /// `incoming` is given it becomes the block contents; otherwise the old
    /// bytes stay in place. Replacing a valid line bumps the dirty or clean
    /// eviction counter; filling an invalid line bumps neither.
    ///
    /// # Panics
    ///
    /// Panics if `incoming` is not exactly one block long.
    pub fn fill_on_miss(
        &mut self,
        addr: u64,
        operation: Operation,
        incoming: Option<&[u8]>,
    ) -> EvictedLine {
        debug_assert!(
            self.find_resident_line(addr).is_none(),
            "fill_on_miss called for resident address {addr:#x}"
        );

        let layout = self.geometry.layout();
        let decoded = layout.decode(addr);
        let victim = self.select_victim(decoded.set_index);
        let stamp = self.clock.tick();
        let line = self.line_mut(victim);

        let evicted = EvictedLine {
            was_valid: line.valid,
            was_dirty: line.dirty,
            address: layout.compose(line.tag, decoded.set_index, 0),
            data: line.data.clone(),
        };

        line.valid = true;
        line.tag = decoded.tag;
        line.dirty = operation.is_write();
        line.lru = stamp;
        if let Some(block) = incoming {
            line.data.copy_from_slice(block);
        }

        match evicted.kind() {
            Eviction::Dirty => self.stats.dirty_evictions += 1,
            Eviction::Clean => self.stats.clean_evictions += 1,
            Eviction::None => {}
        }
        if evicted.was_valid {
            trace!(
                victim = format_args!("{:#x}", evicted.address),
                dirty = evicted.was_dirty,
                set = victim.set,
                way = victim.way,
                "eviction"
            );
        }

        evicted
    }

    /// Performs one memory operation: lookup, then fill and eviction on a miss.
    ///
    /// Only metadata is simulated here; a miss leaves the victim's old bytes
    /// in the block. The eviction record is counted and dropped.
    pub fn access(&mut self, addr: u64, operation: Operation) -> AccessOutcome {
        if self.record_access(addr, operation) {
            return AccessOutcome::Hit;
        }
        self.fill_on_miss(addr, operation, None).kind().into()
    }

    /// Takes an independent deep copy of the cache.
    ///
    /// The copy has its own line storage, full data blocks, clock and
    /// counters; later changes to either side are invisible to the other.
    pub fn checkpoint(&self) -> Self {
        debug!(
            clock = self.clock.now(),
            accesses = self.stats.accesses(),
            "checkpoint taken"
        );
        self.clone()
    }

    /// Rolls the cache back to `snapshot`, consuming it.
    ///
    /// # Panics
    ///
    /// Panics if `snapshot` was taken from a cache of a different geometry.
    pub fn restore(&mut self, snapshot: Self) {
        assert_eq!(
            self.geometry, snapshot.geometry,
            "cannot restore a checkpoint of a different geometry"
        );
        debug!(
            from_clock = self.clock.now(),
            to_clock = snapshot.clock.now(),
            "checkpoint restored"
        );
        *self = snapshot;
    }

    /// Renders one set for debugging, one line per way.
    ///
    /// # Errors
    ///
    /// [`CacheError::InvalidSet`] if `set_index` is out of range.
    pub fn dump_set(&self, set_index: usize) -> Result<String, CacheError> {
        let set = self.set(set_index).ok_or(CacheError::InvalidSet {
            set_index,
            num_sets: self.geometry.num_sets(),
        })?;
        Ok(set
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
