//! Stable exit codes for parking CLI commands.

/// Command succeeded. Ledger rejections (full, duplicate, not found) still
/// count as success.
pub const OK: i32 = 0;
/// Command failed due to invalid input, config, or an I/O error.
pub const INVALID: i32 = 1;
