//! Two-level inclusive cache hierarchy simulator.
//!
//! This crate models a near (L1) and far (L2) set-associative cache driven by
//! a stream of addresses, and reports per-level miss rates and the average
//! memory access time (AMAT). It is organised as follows:
//! 1. **Cache:** Lines, associative sets with LRU replacement, levels, and the
//!    near/far eviction policies that keep the hierarchy inclusive.
//! 2. **Hierarchy:** The read/write algorithms, including write-allocate and write-around.
//! 3. **Simulation:** Trace parsing, replay, configuration, and statistics.
//!
//! # Example
//!
//! ```
//! use cachesim_core::{CacheHierarchy, HierarchyConfig};
//!
//! let mut caches = CacheHierarchy::new(HierarchyConfig::default()).unwrap();
//! caches.read(0x1000).unwrap();
//! caches.write(0x1000).unwrap();
//!
//! let stats = caches.stats();
//! assert_eq!(stats.near.accesses, 2);
//! assert_eq!(stats.near.misses, 1);
//! ```

/// Set-associative cache structures (line, set, level, eviction policies).
pub mod cache;
/// Common types (addresses, errors).
pub mod common;
/// Hierarchy configuration (defaults, validation, JSON).
pub mod config;
/// Cache hierarchy manager (read/write algorithms).
pub mod hierarchy;
/// Trace parsing and replay.
pub mod sim;
/// Miss rates, AMAT and reporting.
pub mod stats;

/// Root configuration type; use `HierarchyConfig::default()` or deserialize from JSON.
pub use crate::config::HierarchyConfig;
/// Top-level simulator type; construct with `CacheHierarchy::new`.
pub use crate::hierarchy::{AccessKind, AccessOutcome, CacheHierarchy};
/// Statistics snapshot returned by `CacheHierarchy::stats`.
pub use crate::stats::HierarchyStats;
