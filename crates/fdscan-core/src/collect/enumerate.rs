//! Per-process enumeration: command name, special associations, and open
//! descriptors.
//!
//! `/proc` is a volatile snapshot of externally-mutating state. Any single
//! association or descriptor can vanish between listing and probing, so
//! every per-item probe returns `Option` and a failure contributes nothing
//! to the report. Only the command name is load-bearing: if it cannot be
//! resolved the whole run aborts.

use super::registry::PROC_ROOT;
use super::types::{Association, FileEntry, ProcRecord};
use crate::classify::{self, RawStat};
use fdscan_common::{Error, ProcessId, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Enumerate one process. Runs sequentially on the single worker that
/// claimed the process; the file list is appended in discovery order.
pub(crate) fn enumerate(pid: ProcessId) -> Result<ProcRecord> {
    let proc_dir = PathBuf::from(format!("{}/{}", PROC_ROOT, pid));

    let command = read_command_name(pid, &proc_dir)?;
    let uid = read_uid(&proc_dir);

    let mut files = Vec::new();
    for assoc in Association::CLASSICAL {
        if let Some(file) = probe(&proc_dir.join(assoc.to_string()), assoc) {
            files.push(file);
        }
    }
    let ns_dir = proc_dir.join("ns");
    for assoc in Association::NAMESPACES {
        if let Some(file) = probe(&ns_dir.join(assoc.to_string()), assoc) {
            files.push(file);
        }
    }
    collect_fd_files(&proc_dir, &mut files);

    trace!(%pid, files = files.len(), "enumerated process");
    Ok(ProcRecord {
        pid,
        command,
        uid,
        files,
    })
}

/// Resolve the command name from `/proc/<pid>/comm`. Failure aborts the
/// run rather than skipping the process.
fn read_command_name(pid: ProcessId, proc_dir: &Path) -> Result<String> {
    fs::read_to_string(proc_dir.join("comm"))
        .map(|s| s.trim_end_matches('\n').to_string())
        .map_err(|source| Error::CommandName { pid: pid.0, source })
}

/// Real UID from `/proc/<pid>/status`, when readable.
fn read_uid(proc_dir: &Path) -> Option<u32> {
    let content = fs::read_to_string(proc_dir.join("status")).ok()?;
    parse_uid_content(&content)
}

/// Parse the `Uid:` line of a status file. The first value is the real UID.
fn parse_uid_content(content: &str) -> Option<u32> {
    content
        .lines()
        .find(|line| line.starts_with("Uid:"))?
        .split_whitespace()
        .nth(1)?
        .parse()
        .ok()
}

/// Probe one `/proc` symlink: stat for metadata, readlink for the name,
/// then classify. Either step failing (permission denied, entry vanished
/// mid-scan) skips the item silently.
fn probe(path: &Path, assoc: Association) -> Option<FileEntry> {
    let md = fs::metadata(path).ok()?;
    let name = fs::read_link(path).ok()?;
    Some(classify::classify(
        assoc,
        name.to_string_lossy().into_owned(),
        &RawStat::from(&md),
    ))
}

/// Walk `/proc/<pid>/fd/`. An unopenable fd directory yields zero
/// descriptor files without failing the process; the directory handle
/// closes on every exit path by RAII.
fn collect_fd_files(proc_dir: &Path, files: &mut Vec<FileEntry>) {
    let Ok(entries) = fs::read_dir(proc_dir.join("fd")) else {
        return;
    };
    for entry in entries.flatten() {
        let Some(num) = fd_number(&entry.file_name()) else {
            continue;
        };
        if let Some(file) = probe(&entry.path(), Association::Fd(num)) {
            files.push(file);
        }
    }
}

/// Parse a descriptor directory entry name. Unlike PIDs, descriptor 0 is
/// valid.
fn fd_number(name: &std::ffi::OsStr) -> Option<u32> {
    let name = name.to_str()?;
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}
