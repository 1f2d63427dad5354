//! Trace-driven simulation tests.
