//! Set-associative cache structures.
//!
//! This module implements the building blocks of one cache level:
//! lines, associative sets with LRU bookkeeping, and the level itself.
//! Cross-level effects of eviction live in [`policies`].

/// A single cache-line slot.
pub mod line;

/// Associative set with LRU victim selection.
pub mod set;

/// A full cache level: sets, geometry, latency and counters.
pub mod level;

/// Near/far eviction hooks that maintain inclusion.
pub mod policies;

pub use level::CacheLevel;
pub use line::Line;
pub use policies::LevelPolicy;
pub use set::AssociativeSet;
