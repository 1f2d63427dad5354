//! Simulation statistics collection and reporting.
//!
//! This module turns the per-level counters into the figures of interest:
//! 1. **Miss rates:** `misses / accesses` for each level.
//! 2. **AMAT:** Average memory access time combining both levels and memory.
//! 3. **Reporting:** The single summary line printed by the driver, and a detailed breakdown.
//!
//! A miss rate over zero accesses is undefined and reported as `NaN`; callers
//! must check [`LevelStats::accesses`] before reading a rate as "no misses".

use std::fmt;
use std::io;

use serde::Serialize;

/// Counters and latency of one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelStats {
    /// Lookups performed at this level.
    pub accesses: u64,
    /// Lookups that did not find the block.
    pub misses: u64,
    /// Access latency in cycles.
    pub latency: u64,
}

impl LevelStats {
    /// `misses / accesses`, or `NaN` when `accesses == 0`.
    pub fn miss_rate(&self) -> f64 {
        if self.accesses == 0 {
            return f64::NAN;
        }
        self.misses as f64 / self.accesses as f64
    }

    /// Lookups that found the block.
    pub const fn hits(&self) -> u64 {
        self.accesses.saturating_sub(self.misses)
    }
}

/// Snapshot of a hierarchy's statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HierarchyStats {
    /// Level closest to the requester.
    pub near: LevelStats,
    /// Level closest to memory.
    pub far: LevelStats,
    /// Main memory latency in cycles.
    pub memory_latency: u64,
}

impl HierarchyStats {
    /// L1 miss rate; `NaN` if nothing was accessed.
    pub fn near_miss_rate(&self) -> f64 {
        self.near.miss_rate()
    }

    /// L2 miss rate; `NaN` if L1 never missed.
    pub fn far_miss_rate(&self) -> f64 {
        self.far.miss_rate()
    }

    /// Average memory access time in cycles.
    ///
    /// `L1 latency + L1 miss rate × L2 latency + L1 miss rate × L2 miss rate × memory latency`.
    ///
    /// When L1 never missed the L2 and memory terms carry zero weight and are
    /// dropped, so an all-hit trace yields the L1 latency rather than `NaN`.
    /// With no accesses at all the result is `NaN`.
    pub fn amat(&self) -> f64 {
        let near_rate = self.near_miss_rate();
        let base = self.near.latency as f64;
        if self.near.accesses > 0 && self.near.misses == 0 {
            return base;
        }
        let far_rate = self.far_miss_rate();
        base + near_rate * self.far.latency as f64
            + near_rate * far_rate * self.memory_latency as f64
    }

    /// `(L1 miss rate, L2 miss rate, AMAT)`.
    pub fn rates(&self) -> (f64, f64, f64) {
        (self.near_miss_rate(), self.far_miss_rate(), self.amat())
    }

    /// Writes a per-level breakdown, one counter per line.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn write_detailed<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "==========================================================")?;
        writeln!(out, "CACHE HIERARCHY STATISTICS")?;
        writeln!(out, "==========================================================")?;
        for (name, level) in [("l1", &self.near), ("l2", &self.far)] {
            writeln!(out, "{name}.latency               {} cycles", level.latency)?;
            writeln!(out, "{name}.accesses              {}", level.accesses)?;
            writeln!(out, "{name}.hits                  {}", level.hits())?;
            writeln!(out, "{name}.misses                {}", level.misses)?;
            writeln!(out, "{name}.miss_rate             {:.4}", level.miss_rate())?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        writeln!(out, "mem.latency              {} cycles", self.memory_latency)?;
        writeln!(out, "amat                     {:.4} cycles", self.amat())
    }
}

impl fmt::Display for HierarchyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (l1, l2, amat) = self.rates();
        write!(f, "L1miss={l1:.03} L2miss={l2:.03} AccTimeAvg={amat:.03}")
    }
}
