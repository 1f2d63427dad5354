//! Two-level inclusive cache hierarchy.
//!
//! [`CacheHierarchy`] owns a near (L1) and a far (L2) [`CacheLevel`] and runs
//! the read and write algorithms against them. Each call is a short decision
//! tree:
//!
//! 1. **Decompose:** Shift off the block offset, then split the block number
//!    independently for each level.
//! 2. **Near lookup:** A hit only refreshes L1 (and, for writes, dirties it).
//! 3. **Far lookup:** On an L1 miss, L2 is consulted and filled as needed.
//! 4. **Refill:** L1 is populated according to the read path or the write
//!    policy (write-allocate or write-around).
//!
//! The inclusion invariant (every valid L1 block also valid in L2) may be
//! broken only inside a call. If a line that must be resident after a fill is
//! missing, the call fails with [`SimError::InclusionViolated`].

use tracing::{info, trace};

use crate::cache::{CacheLevel, LevelPolicy};
use crate::common::addr::{BlockAddr, ByteAddr, Location};
use crate::common::error::{ConfigError, SimError};
use crate::config::HierarchyConfig;
use crate::stats::HierarchyStats;

/// Kind of memory operation in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Data load.
    Read,
    /// Data store.
    Write,
}

/// Where an access was satisfied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessOutcome {
    /// Found in L1.
    NearHit,
    /// Missed L1, found in L2.
    FarHit,
    /// Missed both levels.
    Miss,
}

/// The cache hierarchy manager.
#[derive(Clone, Debug)]
pub struct CacheHierarchy {
    near: CacheLevel,
    far: CacheLevel,
    config: HierarchyConfig,
}

impl CacheHierarchy {
    /// Builds an empty hierarchy.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`HierarchyConfig::validate`]
    /// or by level construction.
    pub fn new(config: HierarchyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let block_bits = config.block_size_log2;
        let near = CacheLevel::new(
            config.l1.line_count(block_bits),
            config.l1.ways(),
            config.l1.latency,
            LevelPolicy::Near,
        )?;
        let far = CacheLevel::new(
            config.l2.line_count(block_bits),
            config.l2.ways(),
            config.l2.latency,
            LevelPolicy::Far,
        )?;

        info!(
            block_bytes = config.block_size(),
            l1_sets = near.set_count(),
            l1_ways = near.ways(),
            l2_sets = far.set_count(),
            l2_ways = far.ways(),
            write_allocate = config.write_allocate,
            "cache hierarchy built"
        );

        Ok(Self { near, far, config })
    }

    /// Dispatches a trace operation to [`read`](Self::read) or [`write`](Self::write).
    ///
    /// # Errors
    ///
    /// See [`read`](Self::read).
    pub fn access(&mut self, kind: AccessKind, address: u64) -> Result<AccessOutcome, SimError> {
        match kind {
            AccessKind::Read => self.read(address),
            AccessKind::Write => self.write(address),
        }
    }

    /// Simulates a load from `address`.
    ///
    /// On an L1 miss the block is brought into L2 (if absent) and then always
    /// into L1; the fresh L1 line inherits the L2 copy's dirty bit.
    ///
    /// # Errors
    ///
    /// [`SimError::InclusionViolated`] if either copy is missing after the refill.
    pub fn read(&mut self, address: u64) -> Result<AccessOutcome, SimError> {
        let (block, near_loc, far_loc) = self.decompose(address);

        self.near.add_access();
        if self.near.probe(near_loc) {
            self.near.touch(near_loc);
            trace!(address, "read L1 hit");
            return Ok(AccessOutcome::NearHit);
        }
        self.near.add_miss();

        self.far.add_access();
        let outcome = if self.far.probe(far_loc) {
            self.far.touch(far_loc);
            AccessOutcome::FarHit
        } else {
            self.far.add_miss();
            self.far.fill_on_miss(far_loc, block, &mut self.near);
            AccessOutcome::Miss
        };

        self.near.fill_on_miss(near_loc, block, &mut self.far);

        let far_dirty = self
            .far
            .line(far_loc)
            .ok_or(SimError::InclusionViolated {
                block,
                level: LevelPolicy::Far,
            })?
            .is_dirty();
        self.near
            .line_mut(near_loc)
            .ok_or(SimError::InclusionViolated {
                block,
                level: LevelPolicy::Near,
            })?
            .set_dirty(far_dirty);

        trace!(address, ?outcome, "read");
        Ok(outcome)
    }

    /// Simulates a store to `address`.
    ///
    /// - L1 hit: the line is dirtied.
    /// - L2 hit: with write-allocate the block is brought into L1 and dirtied
    ///   there; otherwise the L2 copy is dirtied and L1 is left untouched.
    /// - Miss: with write-allocate the block is filled into both levels and
    ///   dirtied in L1; otherwise the store goes straight to memory.
    ///
    /// # Errors
    ///
    /// [`SimError::InclusionViolated`] if a line allocated by this store is
    /// missing afterwards.
    pub fn write(&mut self, address: u64) -> Result<AccessOutcome, SimError> {
        let (block, near_loc, far_loc) = self.decompose(address);

        self.near.add_access();
        if self.near.probe(near_loc) {
            let _ = self.near.mark_dirty(near_loc);
            self.near.touch(near_loc);
            trace!(address, "write L1 hit");
            return Ok(AccessOutcome::NearHit);
        }
        self.near.add_miss();

        self.far.add_access();
        let outcome = if self.far.probe(far_loc) {
            if self.config.write_allocate {
                self.near.fill_on_miss(near_loc, block, &mut self.far);
                self.dirty_near(near_loc, block)?;
                self.near.touch(near_loc);
            } else {
                let _ = self.far.mark_dirty(far_loc);
            }
            self.far.touch(far_loc);
            AccessOutcome::FarHit
        } else {
            self.far.add_miss();
            if self.config.write_allocate {
                self.far.fill_on_miss(far_loc, block, &mut self.near);
                self.far.touch(far_loc);

                self.near.fill_on_miss(near_loc, block, &mut self.far);
                self.dirty_near(near_loc, block)?;
                self.near.touch(near_loc);
            }
            AccessOutcome::Miss
        };

        if self.config.write_allocate && !self.far.probe(far_loc) {
            return Err(SimError::InclusionViolated {
                block,
                level: LevelPolicy::Far,
            });
        }

        trace!(address, ?outcome, "write");
        Ok(outcome)
    }

    /// Current statistics.
    pub const fn stats(&self) -> HierarchyStats {
        HierarchyStats {
            near: self.near.stats(),
            far: self.far.stats(),
            memory_latency: self.config.memory_latency,
        }
    }

    /// First resident L1 block without an L2 copy, or `None` if the
    /// hierarchy is inclusive.
    pub fn check_inclusion(&self) -> Option<BlockAddr> {
        self.near
            .valid_blocks()
            .find(|&block| !self.far.contains(block))
    }

    /// The level closest to the requester.
    pub const fn near(&self) -> &CacheLevel {
        &self.near
    }

    /// The level closest to memory.
    pub const fn far(&self) -> &CacheLevel {
        &self.far
    }

    /// Configuration the hierarchy was built from.
    pub const fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// Block number of `address`.
    pub const fn block_of(&self, address: u64) -> BlockAddr {
        ByteAddr::new(address).block(self.config.block_size_log2)
    }

    fn decompose(&self, address: u64) -> (BlockAddr, Location, Location) {
        let block = self.block_of(address);
        (block, self.near.locate(block), self.far.locate(block))
    }

    fn dirty_near(&mut self, loc: Location, block: BlockAddr) -> Result<(), SimError> {
        if self.near.mark_dirty(loc) {
            Ok(())
        } else {
            Err(SimError::InclusionViolated {
                block,
                level: LevelPolicy::Near,
            })
        }
    }
}
