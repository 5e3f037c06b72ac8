//! Cache lines and the values the engine hands back to callers.

use std::fmt;

use crate::common::constants::LRU_NEVER_USED;

/// One way of a set: metadata plus a fixed-size data block.
///
/// The block length is fixed at creation and never changes. The tag is only
/// meaningful while the line is valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheLine {
    pub(crate) valid: bool,
    pub(crate) tag: u64,
    pub(crate) dirty: bool,
    pub(crate) lru: u64,
    pub(crate) data: Box<[u8]>,
}

impl CacheLine {
    /// A zeroed, invalid line holding `block_size` bytes.
    pub(crate) fn empty(block_size: usize) -> Self {
        Self::with_block(vec![0; block_size].into_boxed_slice())
    }

    /// Like [`empty`](Self::empty), but reports allocation failure as `None`.
    pub(crate) fn try_empty(block_size: usize) -> Option<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(block_size).ok()?;
        data.resize(block_size, 0);
        Some(Self::with_block(data.into_boxed_slice()))
    }

    const fn with_block(data: Box<[u8]>) -> Self {
        Self {
            valid: false,
            tag: 0,
            dirty: false,
            lru: LRU_NEVER_USED,
            data,
        }
    }

    /// Whether the line currently holds a block.
    #[inline(always)]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Tag of the held block (stale when invalid).
    #[inline(always)]
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Whether the block has been written since it was filled.
    #[inline(always)]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Stamp of the last hit or fill ([`LRU_NEVER_USED`] if never touched).
    #[inline(always)]
    pub const fn lru(&self) -> u64 {
        self.lru
    }

    /// Block contents.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for CacheLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Valid: {} Tag: {:x} Lru: {} Dirty: {}",
            u8::from(self.valid),
            self.tag,
            self.lru,
            u8::from(self.dirty)
        )
    }
}

/// Position of a line in the cache.
///
/// Lookups and victim selection hand out positions rather than references;
/// the line is only borrowed mutably at the point it is updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId {
    /// Set index.
    pub set: usize,
    /// Way within the set.
    pub way: usize,
}

/// How a miss disposed of the line it replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Eviction {
    /// The victim was invalid: a pure fill, nothing lost.
    None,
    /// A valid, unmodified block was dropped.
    Clean,
    /// A valid, modified block was dropped and must be written back.
    Dirty,
}

/// Snapshot of a line taken just before a miss overwrote it.
///
/// Owned by the caller; it holds no reference into the cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvictedLine {
    /// Whether the victim held a block.
    pub was_valid: bool,
    /// Whether that block was dirty.
    pub was_dirty: bool,
    /// Base address of the victim's block, rebuilt from its tag and set.
    pub address: u64,
    /// The victim's block contents.
    pub data: Box<[u8]>,
}

impl EvictedLine {
    /// Classifies the replacement.
    pub const fn kind(&self) -> Eviction {
        match (self.was_valid, self.was_dirty) {
            (false, _) => Eviction::None,
            (true, false) => Eviction::Clean,
            (true, true) => Eviction::Dirty,
        }
    }

    /// Whether the snapshot must be written back to the next level.
    pub const fn needs_writeback(&self) -> bool {
        matches!(self.kind(), Eviction::Dirty)
    }
}

/// Result of one [`access`](super::Cache::access).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessOutcome {
    /// The block was resident.
    Hit,
    /// The block was installed into an invalid line.
    Miss,
    /// The block replaced a valid, clean line.
    MissCleanEviction,
    /// The block replaced a valid, dirty line.
    MissDirtyEviction,
}

impl AccessOutcome {
    /// Whether the access hit.
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Whether the access displaced a valid line.
    pub const fn evicted(self) -> bool {
        matches!(self, Self::MissCleanEviction | Self::MissDirtyEviction)
    }
}

impl From<Eviction> for AccessOutcome {
    fn from(eviction: Eviction) -> Self {
        match eviction {
            Eviction::None => Self::Miss,
            Eviction::Clean => Self::MissCleanEviction,
            Eviction::Dirty => Self::MissDirtyEviction,
        }
    }
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "hit"),
            Self::Miss => write!(f, "miss"),
            Self::MissCleanEviction => write!(f, "miss eviction"),
            Self::MissDirtyEviction => write!(f, "miss dirty-eviction"),
        }
    }
}
