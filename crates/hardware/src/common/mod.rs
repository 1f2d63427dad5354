//! Common types shared by every part of the simulator.
//!
//! This module provides the building blocks used across the cache engine. It includes:
//! 1. **Address Types:** Strong types for byte addresses, block numbers and set locations.
//! 2. **Error Handling:** Configuration, consistency, and trace error definitions.

/// Address type definitions (byte addresses, block numbers, set locations).
pub mod addr;

/// Error types for configuration, simulation, and trace parsing.
pub mod error;

pub use addr::{BlockAddr, ByteAddr, Location};
pub use error::{ConfigError, SimError, TraceError};
