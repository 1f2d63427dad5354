//! Cache hierarchy tests.

/// Load path: fills, far hits and dirty-bit inheritance.
pub mod read;
