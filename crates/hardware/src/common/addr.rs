//! Byte and block address types.
//!
//! This module defines strong types for the two address spaces the simulator
//! deals with. It provides the following:
//! 1. **Type Safety:** Distinguishes raw byte addresses from block numbers at compile time.
//! 2. **Address Decomposition:** Splits a block number into a set index and tag for one level.
//! 3. **Hierarchy Integration:** Acts as the currency passed between levels during eviction.

/// A byte address as it appears in the input trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteAddr(pub u64);

/// A block number: a byte address with the block-offset bits shifted out.
///
/// Every line stores the block number it caches, which is how a level locates
/// the matching line in the other level without sharing set geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockAddr(pub u64);

/// Position of a block inside one cache level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    /// Index of the set the block maps to.
    pub set: usize,
    /// Remaining high-order bits identifying the block within the set.
    pub tag: u64,
}

impl ByteAddr {
    /// Creates a new byte address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Drops the block-offset bits.
    ///
    /// # Arguments
    ///
    /// * `block_bits` - log2 of the block size in bytes; must be below 64.
    ///
    /// # Returns
    ///
    /// The block number containing this byte.
    #[inline(always)]
    pub const fn block(self, block_bits: u32) -> BlockAddr {
        BlockAddr(self.0 >> block_bits)
    }
}

impl BlockAddr {
    /// Creates a new block address from a raw block number.
    #[inline(always)]
    pub const fn new(block: u64) -> Self {
        Self(block)
    }

    /// Returns the raw block number.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Splits the block number for a level with `2^set_bits` sets.
    ///
    /// The low `set_bits` bits select the set; everything above them is the tag.
    ///
    /// # Arguments
    ///
    /// * `set_bits` - log2 of the level's set count; must be below 64.
    ///
    /// # Returns
    ///
    /// The set index and tag for this block.
    #[inline(always)]
    pub const fn split(self, set_bits: u32) -> Location {
        let mask = (1u64 << set_bits) - 1;
        Location {
            set: (self.0 & mask) as usize,
            tag: self.0 >> set_bits,
        }
    }
}

impl std::fmt::Display for BlockAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
