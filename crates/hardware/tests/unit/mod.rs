//! # Unit Components
//!
//! This module serves as the central hub for the per-layer tests of the
//! cache model, mirroring the crate's module tree.


/// Unit tests for configuration parsing and geometry validation.
pub mod config;
