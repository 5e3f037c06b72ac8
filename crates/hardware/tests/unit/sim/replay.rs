//! Trace Replay Tests.
//!
//! Verifies that replaying parsed records drives the cache exactly as the
//! equivalent sequence of `access` calls, and that per-record reports list
//! one outcome per lowered operation.

use pretty_assertions::assert_eq;
use wbcache_core::sim::runner;
use wbcache_core::sim::trace;
use wbcache_core::{AccessOutcome, CacheStats, Operation};

use crate::common::cache;

#[test]
fn modify_is_read_then_write() {
    let mut c = cache(2, 3, 1);
    let entries = trace::parse_trace(" M 0,4\n L 20,8\n").unwrap();
    let reports = runner::replay(&mut c, &entries);

    assert_eq!(
        reports[0].outcomes,
        vec![AccessOutcome::Miss, AccessOutcome::Hit]
    );
    assert_eq!(reports[1].outcomes, vec![AccessOutcome::MissDirtyEviction]);
    assert_eq!(reports[0].to_string(), "M 0,4 miss hit");
    assert_eq!(reports[1].to_string(), "L 20,8 miss dirty-eviction");
}

#[test]
fn quiet_and_reported_replays_agree() {
    let text = " L 10,1\n M 20,1\n L 22,1\n S 18,1\n L 110,1\n L 210,1\n M 12,1\n L 12,1\n";
    let entries = trace::parse_trace(text).unwrap();

    let mut reported = cache(4, 4, 1);
    let _ = runner::replay(&mut reported, &entries);

    let mut quiet = cache(4, 4, 1);
    let stats = runner::replay_quiet(&mut quiet, &entries);

    assert_eq!(stats, reported.stats());
}

#[test]
fn replay_matches_manual_accesses() {
    let entries = trace::parse_trace(" S 0,8\n S 20,8\n L 20,8\n M 40,8\n").unwrap();

    let mut replayed = cache(2, 3, 1);
    let stats = runner::replay_quiet(&mut replayed, &entries);

    let mut manual = cache(2, 3, 1);
    for (addr, op) in [
        (0x00, Operation::Write),
        (0x20, Operation::Write),
        (0x20, Operation::Read),
        (0x40, Operation::Read),
        (0x40, Operation::Write),
    ] {
        let _ = manual.access(addr, op);
    }

    assert_eq!(stats, manual.stats());
    assert_eq!(
        stats,
        CacheStats {
            hits: 2,
            misses: 3,
            dirty_evictions: 2,
            clean_evictions: 0,
        }
    );
}
