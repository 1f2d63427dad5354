//! A single cache-line slot.

use crate::common::addr::BlockAddr;

/// One way of an associative set.
///
/// A line starts invalid, becomes valid, clean and most-recently-used on
/// [`fill`](Self::fill), and becomes invalid again on eviction. The dirty bit
/// is set independently by write hits or by inclusion write-back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    valid: bool,
    dirty: bool,
    tag: u64,
    /// Accesses to the owning set since this line was last touched (0 = MRU).
    recency: u64,
    block: BlockAddr,
}

impl Line {
    /// Installs a block in this slot.
    ///
    /// # Arguments
    ///
    /// * `tag` - Tag of the block in the owning level.
    /// * `block` - Block number, kept so the other level can locate its copy.
    pub fn fill(&mut self, tag: u64, block: BlockAddr) {
        self.valid = true;
        self.dirty = false;
        self.recency = 0;
        self.tag = tag;
        self.block = block;
    }

    /// Raw tag comparison; does not look at the valid bit.
    #[inline(always)]
    pub const fn compare_tag(&self, tag: u64) -> bool {
        self.tag == tag
    }

    /// True when the line is valid and holds `tag`.
    #[inline(always)]
    pub const fn holds(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }

    /// Drops the block from this slot. Dirty state is left for the caller to inspect.
    pub const fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Sets or clears the dirty bit.
    pub const fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Marks this line most-recently-used.
    pub(crate) const fn reset_recency(&mut self) {
        self.recency = 0;
    }

    /// Ages this line by one set access.
    pub(crate) const fn age(&mut self) {
        self.recency = self.recency.saturating_add(1);
    }

    /// Whether the slot holds a block.
    #[inline(always)]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the block has been modified.
    #[inline(always)]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Tag of the cached block.
    #[inline(always)]
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Set accesses since this line was last touched.
    #[inline(always)]
    pub const fn recency(&self) -> u64 {
        self.recency
    }

    /// Block number of the cached block.
    #[inline(always)]
    pub const fn block(&self) -> BlockAddr {
        self.block
    }
}
