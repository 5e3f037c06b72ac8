//! Trace replay.
//!
//! Drives a [`Cache`] with parsed trace records, one `access` per cache
//! operation, and optionally reports what each record did.

use std::fmt;

use crate::core::Cache;
use crate::core::units::cache::line::AccessOutcome;
use crate::sim::trace::TraceEntry;
use crate::stats::CacheStats;

/// What one trace record did to the cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryReport {
    /// The record replayed.
    pub entry: TraceEntry,
    /// One outcome per cache operation (two for a modify).
    pub outcomes: Vec<AccessOutcome>,
}

impl fmt::Display for EntryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entry)?;
        for outcome in &self.outcomes {
            write!(f, " {outcome}")?;
        }
        Ok(())
    }
}

/// Replays a single record.
pub fn run_entry(cache: &mut Cache, entry: &TraceEntry) -> EntryReport {
    let outcomes = entry
        .op
        .operations()
        .iter()
        .map(|&operation| cache.access(entry.addr, operation))
        .collect();
    EntryReport {
        entry: *entry,
        outcomes,
    }
}

/// Replays every record and returns a report per record.
pub fn replay(cache: &mut Cache, entries: &[TraceEntry]) -> Vec<EntryReport> {
    entries.iter().map(|entry| run_entry(cache, entry)).collect()
}

/// Replays every record without keeping per-record reports.
///
/// Returns the cache's counters after the last record.
pub fn replay_quiet(cache: &mut Cache, entries: &[TraceEntry]) -> CacheStats {
    for entry in entries {
        for &operation in entry.op.operations() {
            let _ = cache.access(entry.addr, operation);
        }
    }
    tracing::debug!(entries = entries.len(), "trace replayed");
    cache.stats()
}
