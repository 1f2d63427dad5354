//! Level eviction policies.
//!
//! The near and far levels share every operation except what happens when a
//! line is evicted. These hooks are what keep the hierarchy inclusive:
//!
//! - `Near`: the far copy absorbs the evicted line's dirty bit and is
//!   refreshed; it is never removed.
//! - `Far`: any near copy of the evicted block is back-invalidated, since a
//!   line cannot stay nearer to the requester than its backing copy.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::level::CacheLevel;
use super::line::Line;

/// Which side of the hierarchy a level sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelPolicy {
    /// The level closest to the requester (L1).
    Near,
    /// The level closest to memory (L2).
    Far,
}

impl LevelPolicy {
    /// The role of the opposite level.
    pub const fn other(self) -> Self {
        match self {
            Self::Near => Self::Far,
            Self::Far => Self::Near,
        }
    }

    /// Evicts `line` from a level with this policy.
    ///
    /// # Arguments
    ///
    /// * `line` - The victim; invalid on return.
    /// * `other` - The opposite level, updated to preserve inclusion.
    pub fn evict(self, line: &mut Line, other: &mut CacheLevel) {
        let block = line.block();
        match self {
            Self::Near => {
                let dirty = line.is_dirty();
                if let Some(far_line) = other.find_mut(block) {
                    far_line.set_dirty(dirty);
                    other.touch_block(block);
                }
                line.invalidate();
                debug!(block = %block, dirty, "L1 evict, written back to L2");
            }
            Self::Far => {
                line.invalidate();
                let back_invalidated = match other.find_mut(block) {
                    Some(near_line) => {
                        near_line.invalidate();
                        true
                    }
                    None => false,
                };
                debug!(block = %block, back_invalidated, "L2 evict");
            }
        }
    }
}

impl fmt::Display for LevelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Near => write!(f, "L1"),
            Self::Far => write!(f, "L2"),
        }
    }
}
