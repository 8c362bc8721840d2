//! Error types for fdscan.
//!
//! Two severities exist in practice. Errors in this enum are fatal to the
//! whole run: they abort collection or rendering and map to a nonzero exit
//! code. Per-item failures during a scan (a descriptor closing mid-probe, a
//! vanished `/proc` entry) are never surfaced as errors at all; the probing
//! functions return `Option` and the item is simply absent from the report.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fdscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors for fdscan operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A requested output column does not exist in the catalog.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// The process table itself could not be listed.
    #[error("failed to list {path}: {source}")]
    ProcList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A process's command name could not be resolved.
    #[error("failed to get command name for pid {pid}: {source}")]
    CommandName {
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    /// A collection worker thread panicked.
    #[error("collection worker panicked")]
    WorkerPanicked,

    /// The report could not be written to the output stream.
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),

    /// The JSON report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error was caused by invalid user input rather than a
    /// failure of the scan or output machinery.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::UnknownColumn(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_column_names_the_token() {
        let err = Error::UnknownColumn("BOGUS".to_string());
        assert!(err.to_string().contains("BOGUS"));
        assert!(err.is_usage());
    }

    #[test]
    fn collection_errors_are_not_usage() {
        let err = Error::CommandName {
            pid: 1,
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(!err.is_usage());
        assert!(err.to_string().contains("pid 1"));
    }
}
