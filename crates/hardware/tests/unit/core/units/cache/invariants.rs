//! Structural Invariant Tests.
//!
//! Replays random traces over random small geometries and checks, after
//! every access, the properties the engine guarantees: no duplicate resident
//! tags within a set, exactly one of hit/miss per access, eviction counters
//! that match the state of the replaced line, and agreement with a
//! recency-list reference model.

use std::collections::{HashSet, VecDeque};

use proptest::prelude::*;
use wbcache_core::{AccessOutcome, Cache, Operation};

use crate::common::cache;

/// Reference model: per set, resident `(tag, dirty)` ordered MRU first.
struct RecencyModel {
    sets: Vec<VecDeque<(u64, bool)>>,
    ways: usize,
}

impl RecencyModel {
    fn new(cache: &Cache) -> Self {
        let g = cache.geometry();
        Self {
            sets: vec![VecDeque::new(); g.num_sets()],
            ways: g.associativity(),
        }
    }

    fn access(&mut self, cache: &Cache, addr: u64, op: Operation) -> AccessOutcome {
        let d = cache.geometry().layout().decode(addr);
        let set = &mut self.sets[d.set_index];
        if let Some(pos) = set.iter().position(|&(tag, _)| tag == d.tag) {
            let (tag, dirty) = set.remove(pos).unwrap();
            set.push_front((tag, dirty || op.is_write()));
            return AccessOutcome::Hit;
        }
        let outcome = if set.len() < self.ways {
            AccessOutcome::Miss
        } else {
            match set.pop_back() {
                Some((_, true)) => AccessOutcome::MissDirtyEviction,
                _ => AccessOutcome::MissCleanEviction,
            }
        };
        set.push_front((d.tag, op.is_write()));
        outcome
    }
}

fn geometry() -> impl Strategy<Value = (u32, u32, usize)> {
    (0u32..=3, 0u32..=4, 1usize..=4)
}

fn trace() -> impl Strategy<Value = Vec<(u64, bool)>> {
    // A narrow address range keeps conflicts frequent.
    proptest::collection::vec((0u64..512, any::<bool>()), 1..200)
}

fn assert_no_duplicate_tags(c: &Cache) -> Result<(), TestCaseError> {
    for set_index in 0..c.geometry().num_sets() {
        let mut seen = HashSet::new();
        for line in c.set(set_index).unwrap().iter().filter(|l| l.is_valid()) {
            prop_assert!(
                seen.insert(line.tag()),
                "set {} holds tag {:#x} twice",
                set_index,
                line.tag()
            );
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_after_every_access(
        (s, b, e) in geometry(),
        ops in trace(),
    ) {
        let mut c = cache(s, b, e);
        let mut model = RecencyModel::new(&c);

        for (addr, write) in ops {
            let op = if write { Operation::Write } else { Operation::Read };
            let before = c.stats();
            let clock = c.lru_clock();
            let victim = c.select_victim(c.geometry().layout().set_index(addr));
            let victim_line = c.line(victim).clone();

            let outcome = c.access(addr, op);
            let after = c.stats();

            prop_assert_eq!(outcome, model.access(&c, addr, op));
            prop_assert_eq!(after.accesses(), before.accesses() + 1);
            prop_assert_eq!(c.lru_clock(), clock + 1);

            match outcome {
                AccessOutcome::Hit => {
                    prop_assert_eq!(after.hits, before.hits + 1);
                    prop_assert_eq!(after.evictions(), before.evictions());
                }
                AccessOutcome::Miss => {
                    prop_assert!(!victim_line.is_valid());
                    prop_assert_eq!(after.evictions(), before.evictions());
                }
                AccessOutcome::MissCleanEviction => {
                    prop_assert!(victim_line.is_valid() && !victim_line.is_dirty());
                    prop_assert_eq!(after.clean_evictions, before.clean_evictions + 1);
                    prop_assert_eq!(after.dirty_evictions, before.dirty_evictions);
                }
                AccessOutcome::MissDirtyEviction => {
                    prop_assert!(victim_line.is_valid() && victim_line.is_dirty());
                    prop_assert_eq!(after.dirty_evictions, before.dirty_evictions + 1);
                    prop_assert_eq!(after.clean_evictions, before.clean_evictions);
                }
            }

            let id = c.find_resident_line(addr);
            prop_assert!(id.is_some(), "accessed block must be resident");
            if let Some(id) = id {
                prop_assert_eq!(c.line(id).lru(), c.lru_clock());
                if write {
                    prop_assert!(c.line(id).is_dirty());
                }
            }
            assert_no_duplicate_tags(&c)?;
        }
    }

    /// Replaying the same trace on a checkpoint and on the original yields
    /// identical state.
    #[test]
    fn checkpoint_replays_identically(
        (s, b, e) in geometry(),
        prefix in trace(),
        suffix in trace(),
    ) {
        let mut c = cache(s, b, e);
        for (addr, write) in prefix {
            let _ = c.access(addr, if write { Operation::Write } else { Operation::Read });
        }
        let mut snap = c.checkpoint();
        for (addr, write) in suffix {
            let op = if write { Operation::Write } else { Operation::Read };
            prop_assert_eq!(c.access(addr, op), snap.access(addr, op));
        }
        prop_assert_eq!(c.stats(), snap.stats());
        for set in 0..c.geometry().num_sets() {
            prop_assert_eq!(c.set(set), snap.set(set));
        }
    }
}
