//! Exit code constants for the confsync CLI.
//!
//! - 0: Success
//! - 1: User error (bad arguments, unknown key)
//! - 2: Configuration file is out of date with its template (`check`)
//! - 3: Malformed document (template or on-disk file)
//! - 4: I/O failure while reading or writing a file

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or a lookup that found nothing.
pub const USER_ERROR: i32 = 1;

/// The on-disk file differs from what reconciliation would produce.
pub const OUT_OF_DATE: i32 = 2;

/// A document could not be parsed.
pub const MALFORMED_DOCUMENT: i32 = 3;

/// Reading or writing a file failed.
pub const IO_FAILURE: i32 = 4;
