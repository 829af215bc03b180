//! Exit code constants for userexit.
//!
//! These codes are part of the contract observed by parent processes:
//! - 0: Success / normal exit
//! - 1: Generic abort
//! - 64-78: BSD `sysexits` codes, used by the `userexit` CLI for its own failures
//! - 79-113: Pool for automatically assigned variant statuses
//! - 101: Rust panic status, seen when a variant is defective
//! - 126 and above: reserved by shells (not executable, not found, signals)

use std::ops::RangeInclusive;

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Execution aborted with an error.
pub const ABORT: i32 = 1;

/// Command line usage error (`EX_USAGE`).
pub const USAGE: i32 = 64;

/// Input data was incorrect in some way (`EX_DATAERR`).
pub const DATA_ERROR: i32 = 65;

/// An input file did not exist or was not readable (`EX_NOINPUT`).
pub const NO_INPUT: i32 = 66;

/// Status of a process that panicked.
pub const PANIC: i32 = 101;

/// First status the registry hands out automatically.
pub const AUTO_POOL_START: i32 = 79;

/// Last status the registry hands out automatically.
pub const AUTO_POOL_END: i32 = 113;

/// Statuses the registry assigns to variants that don't declare one.
pub const AUTO_POOL: RangeInclusive<i32> = AUTO_POOL_START..=AUTO_POOL_END;

/// Statuses with a shell-level meaning: 126 (not executable), 127 (not found)
/// and 128+N (killed by signal N).
pub const SHELL_RESERVED: RangeInclusive<i32> = 126..=255;

/// Range of statuses a process can actually report.
pub const VALID: RangeInclusive<i32> = 0..=255;
