//! Cache Model Constants.
//!
//! This module defines the fixed widths the cache model is built around. It includes:
//! 1. **Address Constants:** The flat physical address width.
//! 2. **Data Constants:** The width of a word as moved by the word accessors.
//! 3. **Clock Constants:** The LRU stamp carried by a never-touched line.

/// Width of a physical address in bits.
pub const ADDRESS_BITS: u32 = 64;

/// Size of a word in bytes, as read and written by the word accessors.
pub const WORD_BYTES: usize = 8;

/// LRU stamp of a line that has never been filled or hit.
///
/// The per-cache clock hands out stamps starting at 1, so a zero stamp is
/// always older than any real access.
pub const LRU_NEVER_USED: u64 = 0;
