//! Stable exit codes for cubetimer CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid layout, config, store or arguments, or any other error.
pub const INVALID: i32 = 1;
/// An edit named a solve id that is not in the history, or the history is empty.
pub const NOT_FOUND: i32 = 2;
/// `cubetimer record` discarded a session shorter than the configured minimum.
pub const DISCARDED: i32 = 3;
/// `cubetimer scramble --check` found a redundant move sequence.
pub const REDUNDANT: i32 = 4;
