//! Associative Set.
//!
//! A fixed group of [`Line`]s searched linearly. The set owns the LRU
//! bookkeeping for its lines and the "find or evict" allocation protocol.
//!
//! Recency is an "accesses since last touch" counter rather than a stack
//! position; only the relative order between valid lines matters for victim
//! selection.
//!
//! # Tie-breaks
//!
//! - [`find_free`](AssociativeSet::find_free) returns the first invalid line in way order.
//! - [`victim`](AssociativeSet::victim) returns the first valid line reaching the largest recency.

use super::level::CacheLevel;
use super::line::Line;
use super::policies::LevelPolicy;

/// A set of `ways` cache lines.
#[derive(Clone, Debug)]
pub struct AssociativeSet {
    index: usize,
    ways: Vec<Line>,
}

impl AssociativeSet {
    /// Creates a set of `ways` invalid lines.
    ///
    /// # Arguments
    ///
    /// * `index` - Position of this set within its level.
    /// * `ways` - Associativity; callers guarantee it is non-zero.
    pub fn new(index: usize, ways: usize) -> Self {
        Self {
            index,
            ways: vec![Line::default(); ways],
        }
    }

    /// Position of this set within its level.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// All ways in order, valid or not.
    pub fn lines(&self) -> &[Line] {
        &self.ways
    }

    /// Finds the valid line holding `tag`.
    ///
    /// # Returns
    ///
    /// The unique matching line, or `None` on a miss.
    pub fn find_by_tag(&self, tag: u64) -> Option<&Line> {
        self.ways.iter().find(|line| line.holds(tag))
    }

    /// Mutable variant of [`find_by_tag`](Self::find_by_tag).
    pub fn find_by_tag_mut(&mut self, tag: u64) -> Option<&mut Line> {
        self.ways.iter_mut().find(|line| line.holds(tag))
    }

    /// Returns the first invalid line in way order, or `None` if the set is full.
    pub fn find_free(&mut self) -> Option<&mut Line> {
        self.ways.iter_mut().find(|line| !line.is_valid())
    }

    /// Selects the least-recently-used valid line.
    ///
    /// Comparison is strict, so among lines sharing the largest recency the
    /// one with the lowest way index wins.
    ///
    /// # Returns
    ///
    /// The victim, or `None` if the set holds no valid line.
    pub fn victim(&self) -> Option<&Line> {
        self.victim_way().map(|way| &self.ways[way])
    }

    fn victim_way(&self) -> Option<usize> {
        let mut victim: Option<usize> = None;
        for (way, line) in self.ways.iter().enumerate() {
            if !line.is_valid() {
                continue;
            }
            match victim {
                Some(best) if self.ways[best].recency() >= line.recency() => {}
                _ => victim = Some(way),
            }
        }
        victim
    }

    /// Evicts the victim to make room for a fill.
    ///
    /// Runs `policy`'s eviction hook against `other`, the opposite level of the
    /// hierarchy, then hands back the now-invalid line for reuse. Only call this
    /// when [`find_free`](Self::find_free) returned `None`.
    ///
    /// # Arguments
    ///
    /// * `policy` - Eviction behaviour of the level owning this set.
    /// * `other` - The other level, updated to keep the hierarchy inclusive.
    ///
    /// # Returns
    ///
    /// The freed line, or `None` if the set held no valid line to evict.
    pub fn evict_for_space(
        &mut self,
        policy: LevelPolicy,
        other: &mut CacheLevel,
    ) -> Option<&mut Line> {
        let way = self.victim_way()?;
        let line = &mut self.ways[way];
        policy.evict(line, other);
        Some(line)
    }

    /// Updates LRU state after an access to `tag`.
    ///
    /// The matching valid line becomes most-recently-used; every other valid
    /// line ages by one. Invalid lines are left alone.
    pub fn touch(&mut self, tag: u64) {
        for line in self.ways.iter_mut().filter(|line| line.is_valid()) {
            if line.compare_tag(tag) {
                line.reset_recency();
            } else {
                line.age();
            }
        }
    }
}
