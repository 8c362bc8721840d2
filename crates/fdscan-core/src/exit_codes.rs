//! Exit codes for the fdscan CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Ranges:
//! - 0: clean run
//! - 10-19: user/environment errors (recoverable by user action)
//! - 20-29: internal errors (bugs, should be reported)

use fdscan_common::Error;

/// Exit codes for fdscan operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Report produced.
    Success = 0,

    /// Invalid arguments, including an unknown column name.
    ArgsError = 10,

    /// The scan itself failed: unreadable process table, unresolvable
    /// command name, or a broken worker.
    CollectError = 12,

    /// The report could not be written or serialized.
    OutputError = 20,
}

impl ExitCode {
    /// Map a fatal error to its exit code.
    pub fn from_error(err: &Error) -> ExitCode {
        match err {
            Error::UnknownColumn(_) => ExitCode::ArgsError,
            Error::ProcList { .. } | Error::CommandName { .. } | Error::WorkerPanicked => {
                ExitCode::CollectError
            }
            Error::Output(_) | Error::Serialize(_) => ExitCode::OutputError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}
