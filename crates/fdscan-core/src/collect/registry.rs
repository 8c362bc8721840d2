//! Process registry: the initial ordered set of PIDs to scan.

use fdscan_common::{Error, ProcessId, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Root of the process table.
pub(crate) const PROC_ROOT: &str = "/proc";

/// List `/proc` and keep entries whose names are positive integers, in
/// listing order. Non-numeric names (`self`, `sys`, ...) are skipped; no
/// task has PID 0, so a zero name is skipped too. Entries are inherently
/// distinct, so no deduplication happens. Failing to open `/proc` itself
/// is fatal to the whole run.
pub fn collect_pids() -> Result<Vec<ProcessId>> {
    let root = Path::new(PROC_ROOT);
    let entries = fs::read_dir(root).map_err(|source| Error::ProcList {
        path: root.to_path_buf(),
        source,
    })?;

    let mut pids = Vec::new();
    for entry in entries.flatten() {
        if let Some(pid) = numeric_pid(&entry.file_name()) {
            pids.push(ProcessId(pid));
        }
    }
    debug!(count = pids.len(), "listed process table");
    Ok(pids)
}

/// Parse a directory entry name as a PID: all-digit names only, zero
/// excluded.
fn numeric_pid(name: &OsStr) -> Option<u32> {
    let name = name.to_str()?;
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let pid = name.parse::<u32>().ok()?;
    (pid > 0).then_some(pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_names_parse_as_pids() {
        assert_eq!(numeric_pid(OsStr::new("1")), Some(1));
        assert_eq!(numeric_pid(OsStr::new("431203")), Some(431203));
    }

    #[test]
    fn non_numeric_and_zero_names_are_skipped() {
        for name in ["self", "thread-self", "sys", "cpuinfo", "", "12a", "-3", "+7", "0"] {
            assert_eq!(numeric_pid(OsStr::new(name)), None, "{name:?}");
        }
    }
}
