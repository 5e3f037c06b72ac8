//! Error definitions.
//!
//! This module defines the recoverable failures of the cache model. It provides:
//! 1. **Configuration Errors:** Geometries rejected when a cache is created.
//! 2. **Diagnostic Errors:** Out-of-range requests to the debug set dump.
//! 3. **Trace Errors:** Malformed trace records and trace I/O failures.
//!
//! Precondition violations (accessing a non-resident address, a word crossing
//! the end of a block) are programming errors and panic instead.

use std::io;

use thiserror::Error;

/// Errors produced while creating or inspecting a cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// A set must hold at least one line.
    #[error("associativity must be at least 1 (got 0)")]
    ZeroAssociativity,

    /// The set-index and block-offset fields do not fit in a 64-bit address.
    #[error("set bits ({set_bits}) + block bits ({block_bits}) exceed the 64-bit address width")]
    AddressBitsOverflow {
        /// Requested set-index bits (`s`).
        set_bits: u32,
        /// Requested block-offset bits (`b`).
        block_bits: u32,
    },

    /// The requested sets, block size or total storage cannot be indexed on this host.
    #[error(
        "cache storage of 2^{set_bits} sets x {associativity} lines x 2^{block_bits} bytes is not addressable"
    )]
    StorageOverflow {
        /// Requested set-index bits (`s`).
        set_bits: u32,
        /// Requested block-offset bits (`b`).
        block_bits: u32,
        /// Requested lines per set (`E`).
        associativity: usize,
    },

    /// A set index outside `0..num_sets`.
    #[error("invalid set {set_index}: expected 0 <= set < {num_sets}")]
    InvalidSet {
        /// Requested set index.
        set_index: usize,
        /// Number of sets in the cache.
        num_sets: usize,
    },
}

/// Errors produced while reading or parsing a memory trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The operation letter is not one of `L`, `S`, `M` (or a skipped `I`).
    #[error("line {line}: unknown operation '{op}'")]
    UnknownOperation {
        /// 1-based line number.
        line: usize,
        /// The offending operation token.
        op: String,
    },

    /// The record does not have the `<op> <addr>,<size>` shape.
    #[error("line {line}: malformed trace entry '{text}'")]
    MalformedEntry {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        text: String,
    },

    /// The address is not a 64-bit hexadecimal number.
    #[error("line {line}: invalid address '{text}'")]
    InvalidAddress {
        /// 1-based line number.
        line: usize,
        /// The offending address token.
        text: String,
    },

    /// The size is not a decimal number.
    #[error("line {line}: invalid size '{text}'")]
    InvalidSize {
        /// 1-based line number.
        line: usize,
        /// The offending size token.
        text: String,
    },

    /// The trace could not be read.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),
}
