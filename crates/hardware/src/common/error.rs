//! Error definitions.
//!
//! This module defines the error types surfaced by the simulator. It provides:
//! 1. **Configuration Faults:** Geometry that would make address decomposition undefined.
//! 2. **Consistency Faults:** Inclusion violations detected inside a single access.
//! 3. **Trace Faults:** Malformed or unreadable input traces, tagged with line numbers.

use thiserror::Error;

use super::addr::BlockAddr;
use crate::cache::policies::LevelPolicy;

/// Invalid hierarchy or level geometry.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A level cannot hold even one set of `ways` blocks.
    #[error(
        "{level}: size 2^{size_log2} cannot hold one set of 2^{ways_log2} blocks of 2^{block_size_log2} bytes"
    )]
    NoSets {
        /// Level name (`L1` or `L2`).
        level: &'static str,
        /// log2 of the level size in bytes.
        size_log2: u32,
        /// log2 of the associativity.
        ways_log2: u32,
        /// log2 of the block size in bytes.
        block_size_log2: u32,
    },

    /// The level would allocate more lines than the simulator supports.
    #[error("{level}: 2^{lines_log2} lines exceeds the limit of 2^{max_log2}")]
    TooManyLines {
        /// Level name (`L1` or `L2`).
        level: &'static str,
        /// log2 of the requested line count.
        lines_log2: u32,
        /// log2 of the supported maximum.
        max_log2: u32,
    },

    /// Block-offset shift would discard the whole address.
    #[error("block size 2^{0} does not fit a 64-bit address")]
    BlockTooLarge(u32),

    /// Associativity of zero.
    #[error("associativity must be at least 1")]
    ZeroWays,

    /// Line count is not a multiple of the associativity.
    #[error("{lines} lines cannot be divided into {ways}-way sets")]
    UnevenSets {
        /// Total line count.
        lines: usize,
        /// Requested associativity.
        ways: usize,
    },

    /// Set count is not a power of two, so the set-index width is undefined.
    #[error("set count {0} is not a power of two")]
    SetsNotPowerOfTwo(usize),

    /// JSON configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed trace input.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace could not be read.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    /// Operation column is neither a read nor a write.
    #[error("line {line}: unknown operation '{op}'")]
    UnknownOperation {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        op: String,
    },

    /// Line does not have exactly an operation and an address.
    #[error("line {line}: expected '<r|w> <address>'")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
    },

    /// Address column is not valid hexadecimal.
    #[error("line {line}: invalid address '{text}'")]
    InvalidAddress {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        text: String,
    },
}

/// Top-level simulator error.
#[derive(Debug, Error)]
pub enum SimError {
    /// A block that must be resident after a fill was not found.
    ///
    /// This is an internal consistency fault: the inclusion invariant was
    /// broken inside a single access.
    #[error("inclusion violated: block {block} missing from {level} level")]
    InclusionViolated {
        /// The block that should be resident.
        block: BlockAddr,
        /// The level it is missing from.
        level: LevelPolicy,
    },

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid trace.
    #[error(transparent)]
    Trace(#[from] TraceError),
}
