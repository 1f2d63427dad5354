//! Configuration for the cache hierarchy.
//!
//! This module defines the construction parameters of the simulator. It provides:
//! 1. **Defaults:** Baseline geometry and latencies used when a value is not supplied.
//! 2. **Structures:** Per-level and hierarchy-wide configuration, deserializable from JSON.
//! 3. **Validation:** Rejects geometry for which set-index arithmetic would be undefined.
//!
//! Sizes and associativities are expressed as base-2 logarithms, matching the
//! command-line flags of the `cachesim` driver.

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Main memory latency in cycles.
    pub const MEMORY_LATENCY: u64 = 100;

    /// Block size log2 (64-byte blocks).
    pub const BLOCK_SIZE_LOG2: u32 = 6;

    /// Write-allocate on write misses.
    pub const WRITE_ALLOCATE: bool = true;

    /// L1 size log2 (4 KiB).
    pub const L1_SIZE_LOG2: u32 = 12;

    /// L1 associativity log2 (direct-mapped).
    pub const L1_WAYS_LOG2: u32 = 0;

    /// L1 access latency in cycles.
    pub const L1_LATENCY: u64 = 1;

    /// L2 size log2 (32 KiB).
    pub const L2_SIZE_LOG2: u32 = 15;

    /// L2 associativity log2 (4-way).
    pub const L2_WAYS_LOG2: u32 = 2;

    /// L2 access latency in cycles.
    pub const L2_LATENCY: u64 = 10;
}

/// Largest supported line count per level, as a base-2 logarithm.
///
/// Lines are allocated eagerly at construction, so this bounds memory use.
pub const MAX_LINES_LOG2: u32 = 24;

/// Geometry and latency of a single cache level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// log2 of the level capacity in bytes.
    pub size_log2: u32,
    /// log2 of the associativity (0 = direct-mapped).
    #[serde(default)]
    pub ways_log2: u32,
    /// Access latency in cycles.
    pub latency: u64,
}

impl LevelConfig {
    /// Number of lines the level holds for the given block size.
    ///
    /// Only meaningful once [`HierarchyConfig::validate`] has accepted the
    /// configuration.
    pub const fn line_count(&self, block_size_log2: u32) -> usize {
        1usize << (self.size_log2 - block_size_log2)
    }

    /// Associativity of the level.
    pub const fn ways(&self) -> usize {
        1usize << self.ways_log2
    }

    fn validate(&self, level: &'static str, block_size_log2: u32) -> Result<(), ConfigError> {
        if self.size_log2 < block_size_log2.saturating_add(self.ways_log2) {
            return Err(ConfigError::NoSets {
                level,
                size_log2: self.size_log2,
                ways_log2: self.ways_log2,
                block_size_log2,
            });
        }
        let lines_log2 = self.size_log2 - block_size_log2;
        if lines_log2 > MAX_LINES_LOG2 {
            return Err(ConfigError::TooManyLines {
                level,
                lines_log2,
                max_log2: MAX_LINES_LOG2,
            });
        }
        Ok(())
    }
}

/// Complete set of construction parameters for a two-level hierarchy.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::HierarchyConfig;
///
/// let json = r#"{
///     "memory_latency": 100,
///     "block_size_log2": 4,
///     "write_allocate": false,
///     "l1": { "size_log2": 10, "ways_log2": 1, "latency": 1 },
///     "l2": { "size_log2": 14, "ways_log2": 2, "latency": 8 }
/// }"#;
///
/// let config = HierarchyConfig::from_json(json).unwrap();
/// assert!(!config.write_allocate);
/// assert_eq!(config.l1.line_count(config.block_size_log2), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Main memory latency in cycles.
    #[serde(default = "HierarchyConfig::default_memory_latency")]
    pub memory_latency: u64,

    /// log2 of the block size in bytes.
    #[serde(default = "HierarchyConfig::default_block_size_log2")]
    pub block_size_log2: u32,

    /// Allocate lines on write misses (otherwise write-around).
    #[serde(default = "HierarchyConfig::default_write_allocate")]
    pub write_allocate: bool,

    /// Level closest to the requester.
    #[serde(default = "HierarchyConfig::default_l1")]
    pub l1: LevelConfig,

    /// Level closest to memory.
    #[serde(default = "HierarchyConfig::default_l2")]
    pub l2: LevelConfig,
}

impl HierarchyConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// Missing fields fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] on malformed input, or the first
    /// geometry error reported by [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that both levels have a well-defined set-index width.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::BlockTooLarge`] if the block shift would consume the address.
    /// - [`ConfigError::NoSets`] if a level cannot hold one full set.
    /// - [`ConfigError::TooManyLines`] if a level exceeds [`MAX_LINES_LOG2`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size_log2 >= u64::BITS {
            return Err(ConfigError::BlockTooLarge(self.block_size_log2));
        }
        self.l1.validate("L1", self.block_size_log2)?;
        self.l2.validate("L2", self.block_size_log2)
    }

    /// Block size in bytes.
    pub const fn block_size(&self) -> u64 {
        1u64 << self.block_size_log2
    }

    const fn default_memory_latency() -> u64 {
        defaults::MEMORY_LATENCY
    }

    const fn default_block_size_log2() -> u32 {
        defaults::BLOCK_SIZE_LOG2
    }

    const fn default_write_allocate() -> bool {
        defaults::WRITE_ALLOCATE
    }

    const fn default_l1() -> LevelConfig {
        LevelConfig {
            size_log2: defaults::L1_SIZE_LOG2,
            ways_log2: defaults::L1_WAYS_LOG2,
            latency: defaults::L1_LATENCY,
        }
    }

    const fn default_l2() -> LevelConfig {
        LevelConfig {
            size_log2: defaults::L2_SIZE_LOG2,
            ways_log2: defaults::L2_WAYS_LOG2,
            latency: defaults::L2_LATENCY,
        }
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            memory_latency: defaults::MEMORY_LATENCY,
            block_size_log2: defaults::BLOCK_SIZE_LOG2,
            write_allocate: defaults::WRITE_ALLOCATE,
            l1: Self::default_l1(),
            l2: Self::default_l2(),
        }
    }
}
