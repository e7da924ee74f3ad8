//! Stable exit codes for hashroute CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid configuration, script, or navigation target.
pub const INVALID: i32 = 1;
/// `hashroute resolve` landed on no configured route.
pub const NOT_FOUND: i32 = 2;
