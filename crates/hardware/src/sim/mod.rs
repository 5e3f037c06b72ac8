//! Trace-driven simulation.
//!
//! Provides the plumbing that feeds recorded memory traces into a cache:
//! parsing trace files and replaying their records.

/// Trace replay against a cache.
pub mod runner;

/// Trace file parsing.
pub mod trace;
