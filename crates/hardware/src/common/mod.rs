//! Common types shared by every layer of the cache model.
//!
//! This module provides the building blocks the engine and the trace driver agree on.
//! It includes:
//! 1. **Address Decoding:** Splitting flat addresses into tag, set index and block offset.
//! 2. **Constants:** Address width, word width and the initial LRU stamp.
//! 3. **Operations:** Read/write classification of memory accesses.
//! 4. **Error Handling:** Configuration, diagnostic and trace error types.

/// Address decomposition (tag, set index, block offset).
pub mod addr;

/// Fixed widths used by the model.
pub mod constants;

/// Memory operation definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{AddressLayout, DecodedAddr};
pub use constants::{ADDRESS_BITS, LRU_NEVER_USED, WORD_BYTES};
pub use data::Operation;
pub use error::{CacheError, TraceError};
