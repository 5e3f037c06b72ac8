//! Byte and word access to resident blocks.
//!
//! These accessors move data only. Residency, recency and dirtiness are the
//! lookup stage's business: callers make the block resident first (through
//! [`Cache::access`] or [`Cache::record_access`] / [`Cache::fill_on_miss`]).
//! Words are 8 bytes, little-endian, and must lie entirely within one block.

use super::Cache;
use super::line::LineId;
use crate::common::constants::WORD_BYTES;

impl Cache {
    /// Locates the resident line for `addr` and its block offset.
    fn resident(&self, addr: u64) -> (LineId, usize) {
        let Some(id) = self.find_resident_line(addr) else {
            panic!("address {addr:#x} is not resident in the cache");
        };
        (id, self.geometry.layout().block_offset(addr))
    }

    /// Reads the byte at `addr`.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not resident.
    pub fn get_byte(&self, addr: u64) -> u8 {
        let (id, offset) = self.resident(addr);
        self.line(id).data[offset]
    }

    /// Reads the little-endian word starting at `addr`.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not resident or the word runs past the end of the block.
    pub fn get_word(&self, addr: u64) -> u64 {
        let (id, offset) = self.resident(addr);
        let mut bytes = [0u8; WORD_BYTES];
        bytes.copy_from_slice(&self.line(id).data[offset..offset + WORD_BYTES]);
        u64::from_le_bytes(bytes)
    }

    /// Writes `value` to the byte at `addr`.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not resident.
    pub fn set_byte(&mut self, addr: u64, value: u8) {
        let (id, offset) = self.resident(addr);
        self.line_mut(id).data[offset] = value;
    }

    /// Writes `value` as a little-endian word starting at `addr`.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not resident or the word runs past the end of the block.
    pub fn set_word(&mut self, addr: u64, value: u64) {
        let (id, offset) = self.resident(addr);
        self.line_mut(id).data[offset..offset + WORD_BYTES].copy_from_slice(&value.to_le_bytes());
    }
}
