//! Speedcubing practice timer core.
//!
//! Covers scramble generation, a 26-cubie kinematics model and trimmed-mean
//! session statistics. The crate is split the same way throughout:
//!
//! - **[`core`]**: Pure, deterministic logic (notation, scrambles, cube moves,
//!   solve history transitions, statistics). No I/O.
//! - **[`io`]**: Filesystem side of the timer (config, solve store, scaffolding).
//!
//! [`session`] composes the two to implement the CLI commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
