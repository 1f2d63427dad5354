//! Cache Level.
//!
//! An array of [`AssociativeSet`]s plus the level's latency and running
//! counters. The level owns address decomposition and the generic
//! probe/fill/touch operations; what happens to the *other* level when a line
//! is evicted is delegated to its [`LevelPolicy`].
//!
//! Counters are only advanced through [`add_access`](CacheLevel::add_access)
//! and [`add_miss`](CacheLevel::add_miss): probing and filling never count.

use tracing::trace;

use super::line::Line;
use super::policies::LevelPolicy;
use super::set::AssociativeSet;
use crate::common::addr::{BlockAddr, Location};
use crate::common::error::ConfigError;
use crate::stats::LevelStats;

/// One level of the hierarchy.
#[derive(Clone, Debug)]
pub struct CacheLevel {
    policy: LevelPolicy,
    sets: Vec<AssociativeSet>,
    ways: usize,
    set_bits: u32,
    latency: u64,
    accesses: u64,
    misses: u64,
}

impl CacheLevel {
    /// Creates an empty level.
    ///
    /// # Arguments
    ///
    /// * `line_count` - Total number of lines in the level.
    /// * `ways` - Associativity.
    /// * `latency` - Access latency in cycles.
    /// * `policy` - Eviction behaviour (near or far).
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroWays`] if `ways` is zero.
    /// - [`ConfigError::UnevenSets`] if `line_count` is not a multiple of `ways`.
    /// - [`ConfigError::SetsNotPowerOfTwo`] if `line_count / ways` is not a power of two.
    pub fn new(
        line_count: usize,
        ways: usize,
        latency: u64,
        policy: LevelPolicy,
    ) -> Result<Self, ConfigError> {
        if ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if line_count % ways != 0 {
            return Err(ConfigError::UnevenSets {
                lines: line_count,
                ways,
            });
        }
        let set_count = line_count / ways;
        if !set_count.is_power_of_two() {
            return Err(ConfigError::SetsNotPowerOfTwo(set_count));
        }

        Ok(Self {
            policy,
            sets: (0..set_count)
                .map(|index| AssociativeSet::new(index, ways))
                .collect(),
            ways,
            set_bits: set_count.trailing_zeros(),
            latency,
            accesses: 0,
            misses: 0,
        })
    }

    /// Splits a block number into this level's set index and tag.
    #[inline(always)]
    pub const fn locate(&self, block: BlockAddr) -> Location {
        block.split(self.set_bits)
    }

    /// Whether the set at `loc` holds a valid line with `loc.tag`.
    pub fn probe(&self, loc: Location) -> bool {
        self.sets[loc.set].find_by_tag(loc.tag).is_some()
    }

    /// Brings `block` into the level after a miss.
    ///
    /// Uses the first free way of the target set, or evicts the set's LRU
    /// victim (running this level's eviction policy against `other`). The new
    /// line is then touched so it becomes most-recently-used.
    ///
    /// # Arguments
    ///
    /// * `loc` - Target set and tag, from [`locate`](Self::locate).
    /// * `block` - Block number being installed.
    /// * `other` - The opposite level, passed through to the eviction hook.
    pub fn fill_on_miss(&mut self, loc: Location, block: BlockAddr, other: &mut Self) {
        let policy = self.policy;
        let set = &mut self.sets[loc.set];
        match set.find_free() {
            Some(line) => line.fill(loc.tag, block),
            None => {
                if let Some(line) = set.evict_for_space(policy, other) {
                    line.fill(loc.tag, block);
                }
            }
        }
        set.touch(loc.tag);
        trace!(level = %policy, block = %block, set = loc.set, "fill");
    }

    /// Refreshes LRU state in the set at `loc` for an access to `loc.tag`.
    pub fn touch(&mut self, loc: Location) {
        self.sets[loc.set].touch(loc.tag);
    }

    /// Refreshes LRU state for `block`, decomposing it for this level.
    pub fn touch_block(&mut self, block: BlockAddr) {
        self.touch(self.locate(block));
    }

    /// Sets the dirty bit on the valid line at `loc`.
    ///
    /// # Returns
    ///
    /// `false` (and no state change) if the line is not resident.
    pub fn mark_dirty(&mut self, loc: Location) -> bool {
        match self.sets[loc.set].find_by_tag_mut(loc.tag) {
            Some(line) => {
                line.set_dirty(true);
                true
            }
            None => false,
        }
    }

    /// The valid line at `loc`, if resident.
    pub fn line(&self, loc: Location) -> Option<&Line> {
        self.sets[loc.set].find_by_tag(loc.tag)
    }

    /// Mutable variant of [`line`](Self::line).
    pub fn line_mut(&mut self, loc: Location) -> Option<&mut Line> {
        self.sets[loc.set].find_by_tag_mut(loc.tag)
    }

    /// The valid line caching `block`, if resident.
    pub fn find(&self, block: BlockAddr) -> Option<&Line> {
        self.line(self.locate(block))
    }

    /// Mutable variant of [`find`](Self::find).
    pub fn find_mut(&mut self, block: BlockAddr) -> Option<&mut Line> {
        let loc = self.locate(block);
        self.line_mut(loc)
    }

    /// Whether `block` is resident.
    pub fn contains(&self, block: BlockAddr) -> bool {
        self.find(block).is_some()
    }

    /// Iterates over every valid line, set by set, in way order.
    pub fn valid_lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.sets
            .iter()
            .flat_map(|set| set.lines().iter().filter(|line| line.is_valid()))
    }

    /// Block numbers of every resident line.
    pub fn valid_blocks(&self) -> impl Iterator<Item = BlockAddr> + '_ {
        self.valid_lines().map(Line::block)
    }

    /// Counts one access.
    pub const fn add_access(&mut self) {
        self.accesses += 1;
    }

    /// Counts one miss.
    pub const fn add_miss(&mut self) {
        self.misses += 1;
    }

    /// Total accesses recorded.
    pub const fn accesses(&self) -> u64 {
        self.accesses
    }

    /// Total misses recorded.
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// `misses / accesses`; `NaN` when no access has been recorded.
    pub fn miss_rate(&self) -> f64 {
        self.stats().miss_rate()
    }

    /// Snapshot of the counters and latency.
    pub const fn stats(&self) -> LevelStats {
        LevelStats {
            accesses: self.accesses,
            misses: self.misses,
            latency: self.latency,
        }
    }

    /// Access latency in cycles.
    pub const fn latency(&self) -> u64 {
        self.latency
    }

    /// Eviction behaviour of this level.
    pub const fn policy(&self) -> LevelPolicy {
        self.policy
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of sets.
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Width of the set-index field in bits.
    pub const fn set_bits(&self) -> u32 {
        self.set_bits
    }

    /// The set at `index`, or `None` if out of range.
    pub fn set(&self, index: usize) -> Option<&AssociativeSet> {
        self.sets.get(index)
    }
}
