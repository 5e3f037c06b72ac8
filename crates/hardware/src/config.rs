//! Configuration for the cache model.
//!
//! This module defines the user-facing cache configuration and the validated
//! geometry derived from it. It provides:
//! 1. **Defaults:** Baseline geometry used when a field is not supplied.
//! 2. **Structures:** `CacheConfig` (raw, deserializable) and `Geometry` (validated, immutable).
//! 3. **Validation:** Rejection of geometries the model cannot represent.
//!
//! Configuration is supplied as JSON by the command line front end, or built
//! directly with `CacheConfig::default()` and struct update syntax.

use serde::{Deserialize, Serialize};

use crate::common::addr::AddressLayout;
use crate::common::error::CacheError;
use crate::core::units::cache::line::CacheLine;

/// Default configuration constants.
mod defaults {
    /// Default number of set-index bits (16 sets).
    pub const SET_BITS: u32 = 4;

    /// Default number of block-offset bits (16-byte blocks).
    pub const BLOCK_BITS: u32 = 4;

    /// Default associativity (1 way = direct-mapped).
    pub const ASSOCIATIVITY: usize = 1;

    /// Default write-propagation depth.
    pub const DEPTH: u32 = 0;
}

/// Raw cache configuration, in the classic `(s, b, E, d)` form.
///
/// # Examples
///
/// ```
/// use wbcache_core::config::CacheConfig;
///
/// let json = r#"{ "set_bits": 2, "block_bits": 3, "associativity": 2 }"#;
/// let config: CacheConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.depth, 0);
///
/// let geometry = config.validate().unwrap();
/// assert_eq!(geometry.num_sets(), 4);
/// assert_eq!(geometry.block_size(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Number of set-index bits (`s`); the cache has `2^s` sets.
    #[serde(alias = "s")]
    pub set_bits: u32,

    /// Number of block-offset bits (`b`); each block holds `2^b` bytes.
    #[serde(alias = "b")]
    pub block_bits: u32,

    /// Lines per set (`E`).
    #[serde(alias = "E")]
    pub associativity: usize,

    /// Write-propagation depth (`d`). Carried with the geometry but not
    /// consulted by the hit/miss/eviction accounting.
    #[serde(alias = "d")]
    pub depth: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            set_bits: defaults::SET_BITS,
            block_bits: defaults::BLOCK_BITS,
            associativity: defaults::ASSOCIATIVITY,
            depth: defaults::DEPTH,
        }
    }
}

impl CacheConfig {
    /// Checks the configuration and derives the immutable geometry.
    ///
    /// # Errors
    ///
    /// * [`CacheError::ZeroAssociativity`] when `associativity == 0`.
    /// * [`CacheError::AddressBitsOverflow`] when `set_bits + block_bits > 64`.
    /// * [`CacheError::StorageOverflow`] when the set count, block size or
    ///   total storage (line metadata plus data blocks) does not fit in `isize`.
    pub fn validate(&self) -> Result<Geometry, CacheError> {
        if self.associativity == 0 {
            return Err(CacheError::ZeroAssociativity);
        }

        let layout = AddressLayout::new(self.set_bits, self.block_bits).ok_or(
            CacheError::AddressBitsOverflow {
                set_bits: self.set_bits,
                block_bits: self.block_bits,
            },
        )?;

        let overflow = || CacheError::StorageOverflow {
            set_bits: self.set_bits,
            block_bits: self.block_bits,
            associativity: self.associativity,
        };
        let num_sets = 1usize.checked_shl(self.set_bits).ok_or_else(overflow)?;
        let block_size = 1usize.checked_shl(self.block_bits).ok_or_else(overflow)?;
        let line_bytes = size_of::<CacheLine>()
            .checked_add(block_size)
            .ok_or_else(overflow)?;
        let _total = num_sets
            .checked_mul(self.associativity)
            .and_then(|lines| lines.checked_mul(line_bytes))
            .filter(|&bytes| isize::try_from(bytes).is_ok())
            .ok_or_else(overflow)?;

        Ok(Geometry {
            layout,
            associativity: self.associativity,
            depth: self.depth,
            num_sets,
            block_size,
        })
    }
}

/// Validated, immutable cache geometry.
///
/// Obtained from [`CacheConfig::validate`]; every value of this type
/// describes a cache whose storage size is representable and whose
/// addresses decode. Whether the host can actually provide that storage is
/// only known at [`Cache::try_new`](crate::Cache::try_new).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    layout: AddressLayout,
    associativity: usize,
    depth: u32,
    num_sets: usize,
    block_size: usize,
}

impl Geometry {
    /// Address bit layout (`s`, `b`).
    #[inline(always)]
    pub const fn layout(&self) -> AddressLayout {
        self.layout
    }

    /// Number of set-index bits (`s`).
    pub const fn set_bits(&self) -> u32 {
        self.layout.set_bits()
    }

    /// Number of block-offset bits (`b`).
    pub const fn block_bits(&self) -> u32 {
        self.layout.block_bits()
    }

    /// Lines per set (`E`).
    #[inline(always)]
    pub const fn associativity(&self) -> usize {
        self.associativity
    }

    /// Write-propagation depth (`d`).
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of sets (`S = 2^s`).
    #[inline(always)]
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Block size in bytes (`B = 2^b`).
    #[inline(always)]
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Total number of lines (`S * E`).
    pub const fn num_lines(&self) -> usize {
        self.num_sets * self.associativity
    }

    /// Total data capacity in bytes (`S * E * B`).
    pub const fn capacity_bytes(&self) -> usize {
        self.num_lines() * self.block_size
    }

    /// Whether the cache has a single set (fully associative).
    pub const fn is_fully_associative(&self) -> bool {
        self.num_sets == 1
    }

    /// Whether each set holds a single line (direct-mapped).
    pub const fn is_direct_mapped(&self) -> bool {
        self.associativity == 1
    }
}

impl TryFrom<CacheConfig> for Geometry {
    type Error = CacheError;

    fn try_from(config: CacheConfig) -> Result<Self, Self::Error> {
        config.validate()
    }
}

impl From<Geometry> for CacheConfig {
    fn from(geometry: Geometry) -> Self {
        Self {
            set_bits: geometry.set_bits(),
            block_bits: geometry.block_bits(),
            associativity: geometry.associativity,
            depth: geometry.depth,
        }
    }
}
