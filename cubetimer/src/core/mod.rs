//! Deterministic, pure logic for the cube engine and session statistics.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! values, never read the clock or a global random source, and return
//! deterministic outputs suitable for tests.

pub mod cube;
pub mod format;
pub mod invariants;
pub mod notation;
pub mod scramble;
pub mod solve;
pub mod stats;
