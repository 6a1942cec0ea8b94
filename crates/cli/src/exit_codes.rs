//! CLI Exit Code Registry
//!
//! Single source of truth for `shipaudit` exit codes. Exit codes are part
//! of the shell contract — CI pipelines gate on them.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success, every shipment correctly charged      |
//! | 1    | Audit ran; billing discrepancies found         |
//! | 2    | CLI usage error (bad args; emitted by clap)    |
//! | 3    | Invalid audit config                           |
//! | 4    | Runtime error (IO, parse, rate card lookup)    |

/// Success - audit ran and found no over/undercharges.
pub const EXIT_SUCCESS: u8 = 0;

/// Audit ran and found discrepancies.
/// Like `diff(1)`, exit 1 means "differences found."
pub const EXIT_DISCREPANCY: u8 = 1;

/// Usage error - bad arguments. clap emits this itself.
#[allow(dead_code)]
pub const EXIT_USAGE: u8 = 2;

/// Config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Runtime error - unreadable input, malformed CSV, missing rate entry.
pub const EXIT_RUNTIME: u8 = 4;
