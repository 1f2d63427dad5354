//! Trace-driven simulation.
//!
//! Provides the trace parser and the replay loop that drives a
//! [`CacheHierarchy`](crate::hierarchy::CacheHierarchy).

/// Address trace parsing.
pub mod trace;

/// Replay of a parsed trace against a hierarchy.
pub mod replay;

pub use replay::replay;
pub use trace::{TraceOp, load_trace, parse_line, parse_trace};
