//! Memory Operation Types.
//!
//! This module defines the classification of memory operations presented to the cache.
//! These types are used for the following:
//! 1. **Dirty Tracking:** Writes mark a resident line dirty; reads leave the flag alone.
//! 2. **Fill Metadata:** A write miss installs its block already dirty.
//! 3. **Trace Replay:** Trace records are lowered into a sequence of these operations.

use std::fmt;

/// Kind of memory operation performed against the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Operation {
    /// Data read. Never alters the dirty flag.
    #[default]
    Read,

    /// Data write. Marks the target line dirty (written since last fill).
    Write,
}

impl Operation {
    /// Returns `true` for [`Operation::Write`].
    #[inline(always)]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}
