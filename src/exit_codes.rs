//! Exit code constants for the flwr-manifest CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, no manifest found)
//! - 2: Validation failure (missing fields, unresolved references)
//! - 3: Manifest could not be read, parsed, or serialized

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or no manifest at the expected location.
pub const USER_ERROR: i32 = 1;

/// Validation failure: structural errors or unresolved component references.
pub const VALIDATION_FAILURE: i32 = 2;

/// Data-format failure: a file could not be read or parsed, or TOML output
/// could not be produced.
pub const PARSE_FAILURE: i32 = 3;
