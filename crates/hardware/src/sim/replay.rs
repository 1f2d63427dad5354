//! Trace replay.

use tracing::debug;

use super::trace::TraceOp;
use crate::common::error::SimError;
use crate::hierarchy::CacheHierarchy;
use crate::stats::HierarchyStats;

/// Feeds every operation to the hierarchy in order.
///
/// # Errors
///
/// Stops at the first [`SimError`]; counters reflect the operations replayed so far.
pub fn replay<'a, I>(hierarchy: &mut CacheHierarchy, ops: I) -> Result<HierarchyStats, SimError>
where
    I: IntoIterator<Item = &'a TraceOp>,
{
    let mut count = 0u64;
    for op in ops {
        let _ = hierarchy.access(op.kind, op.address)?;
        count += 1;
    }
    debug!(ops = count, "trace replayed");
    Ok(hierarchy.stats())
}
