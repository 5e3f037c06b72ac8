//! Address decomposition.
//!
//! This module splits flat 64-bit physical addresses into the three fields a
//! set-associative cache indexes by. It provides the following:
//! 1. **Decoding:** `addr -> (tag, set_index, block_offset)` for a fixed `(s, b)` layout.
//! 2. **Composition:** The exact inverse, used to rebuild an evicted block's address.
//! 3. **Masks:** Width-safe helpers that stay defined when a field spans all 64 bits.

use crate::common::constants::ADDRESS_BITS;

/// Returns a mask with the low `bits` bits set.
///
/// Saturates at 64 bits instead of overflowing the shift.
#[inline(always)]
pub const fn low_mask(bits: u32) -> u64 {
    if bits >= ADDRESS_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Shifts right, yielding zero when the shift covers the whole word.
#[inline(always)]
const fn shr_or_zero(value: u64, shift: u32) -> u64 {
    if shift >= ADDRESS_BITS { 0 } else { value >> shift }
}

/// Shifts left, yielding zero when the shift covers the whole word.
#[inline(always)]
const fn shl_or_zero(value: u64, shift: u32) -> u64 {
    if shift >= ADDRESS_BITS { 0 } else { value << shift }
}

/// The three fields of an address as seen by a particular cache layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddr {
    /// High-order bits identifying the memory block.
    pub tag: u64,
    /// Middle bits selecting the set.
    pub set_index: usize,
    /// Low-order bits selecting a byte within the block.
    pub block_offset: usize,
}

/// Bit layout of an address: `s` set-index bits above `b` block-offset bits,
/// with the tag taking everything that remains.
///
/// Constructed only through [`AddressLayout::new`], which guarantees
/// `s + b <= 64`; every decoded field is then well-defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AddressLayout {
    set_bits: u32,
    block_bits: u32,
}

impl AddressLayout {
    /// Creates a layout, or `None` when `set_bits + block_bits` exceeds the
    /// 64-bit address width.
    pub const fn new(set_bits: u32, block_bits: u32) -> Option<Self> {
        match set_bits.checked_add(block_bits) {
            Some(total) if total <= ADDRESS_BITS => Some(Self {
                set_bits,
                block_bits,
            }),
            _ => None,
        }
    }

    /// Number of set-index bits (`s`).
    #[inline(always)]
    pub const fn set_bits(&self) -> u32 {
        self.set_bits
    }

    /// Number of block-offset bits (`b`).
    #[inline(always)]
    pub const fn block_bits(&self) -> u32 {
        self.block_bits
    }

    /// Number of tag bits (`64 - s - b`).
    #[inline(always)]
    pub const fn tag_bits(&self) -> u32 {
        ADDRESS_BITS - self.set_bits - self.block_bits
    }

    /// Low `b` bits of `addr`.
    #[inline(always)]
    pub const fn block_offset(&self, addr: u64) -> usize {
        (addr & low_mask(self.block_bits)) as usize
    }

    /// The `s` bits above the block offset.
    #[inline(always)]
    pub const fn set_index(&self, addr: u64) -> usize {
        (shr_or_zero(addr, self.block_bits) & low_mask(self.set_bits)) as usize
    }

    /// All bits above the set index.
    #[inline(always)]
    pub const fn tag(&self, addr: u64) -> u64 {
        shr_or_zero(addr, self.set_bits + self.block_bits)
    }

    /// Splits `addr` into its tag, set index and block offset.
    #[inline]
    pub const fn decode(&self, addr: u64) -> DecodedAddr {
        DecodedAddr {
            tag: self.tag(addr),
            set_index: self.set_index(addr),
            block_offset: self.block_offset(addr),
        }
    }

    /// Reassembles an address from its fields.
    ///
    /// For every `addr`, `compose(decode(addr)) == addr`. Fields wider than
    /// their slot are truncated to fit.
    #[inline]
    pub const fn compose(&self, tag: u64, set_index: usize, block_offset: usize) -> u64 {
        shl_or_zero(tag, self.set_bits + self.block_bits)
            | shl_or_zero(set_index as u64 & low_mask(self.set_bits), self.block_bits)
            | (block_offset as u64 & low_mask(self.block_bits))
    }

    /// Address of the first byte of the block holding `addr`.
    #[inline]
    pub const fn block_base(&self, addr: u64) -> u64 {
        addr & !low_mask(self.block_bits)
    }
}
