//! Process exit codes

/// Successful termination (also: help shown)
pub const OK: i32 = 0;

/// Any failure: usage error, no repository, timeout, remote failure
pub const FAILURE: i32 = 1;

/// Terminated by Ctrl+C (128 + SIGINT)
pub const INTERRUPTED: i32 = 130;
