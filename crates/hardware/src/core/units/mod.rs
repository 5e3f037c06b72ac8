//! Functional units.
//!
//! This module contains the set-associative writeback cache together with
//! its replacement policy and data accessors.

/// Set-associative writeback cache with LRU replacement.
pub mod cache;
