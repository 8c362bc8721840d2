//! Record types produced by the collection phase.
//!
//! A [`ProcRecord`] owns its [`FileEntry`] list; both are created by exactly
//! one worker during collection and are immutable afterwards. File order is
//! discovery order: classical associations first, then namespaces, then
//! descriptors as the fd directory lists them.

use crate::classify::FileClass;
use fdscan_common::ProcessId;
use std::fmt;

/// The role a file plays for its process: an open descriptor number, or one
/// of the fixed special slots resolved from `/proc/<pid>/` symlinks.
///
/// Within one process, association values are unique by construction:
/// descriptor numbers come from distinct directory entries, and each special
/// slot is probed exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Association {
    /// An open file descriptor.
    Fd(u32),
    /// Current working directory (`/proc/<pid>/cwd`).
    Cwd,
    /// Executable image (`/proc/<pid>/exe`).
    Exe,
    /// Root directory (`/proc/<pid>/root`).
    Root,
    /// Cgroup namespace (`/proc/<pid>/ns/cgroup`).
    NsCgroup,
    /// IPC namespace.
    NsIpc,
    /// Mount namespace.
    NsMnt,
    /// Network namespace.
    NsNet,
    /// PID namespace.
    NsPid,
    /// PID namespace for children.
    NsPidForChildren,
    /// Time namespace.
    NsTime,
    /// Time namespace for children.
    NsTimeForChildren,
    /// User namespace.
    NsUser,
    /// UTS namespace.
    NsUts,
}

impl Association {
    /// The three classical per-process symlinks under `/proc/<pid>/`.
    pub const CLASSICAL: [Association; 3] = [Association::Cwd, Association::Exe, Association::Root];

    /// The ten namespace symlinks under `/proc/<pid>/ns/`.
    pub const NAMESPACES: [Association; 10] = [
        Association::NsCgroup,
        Association::NsIpc,
        Association::NsMnt,
        Association::NsNet,
        Association::NsPid,
        Association::NsPidForChildren,
        Association::NsTime,
        Association::NsTimeForChildren,
        Association::NsUser,
        Association::NsUts,
    ];

    /// The descriptor number, for descriptor-backed files.
    pub fn fd(self) -> Option<u32> {
        match self {
            Association::Fd(num) => Some(num),
            _ => None,
        }
    }
}

/// Displays the descriptor number, or the `/proc` entry name of the special
/// slot. The special names double as the path components probed during
/// enumeration.
impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Association::Fd(num) => write!(f, "{}", num),
            Association::Cwd => write!(f, "cwd"),
            Association::Exe => write!(f, "exe"),
            Association::Root => write!(f, "root"),
            Association::NsCgroup => write!(f, "cgroup"),
            Association::NsIpc => write!(f, "ipc"),
            Association::NsMnt => write!(f, "mnt"),
            Association::NsNet => write!(f, "net"),
            Association::NsPid => write!(f, "pid"),
            Association::NsPidForChildren => write!(f, "pid_for_children"),
            Association::NsTime => write!(f, "time"),
            Association::NsTimeForChildren => write!(f, "time_for_children"),
            Association::NsUser => write!(f, "user"),
            Association::NsUts => write!(f, "uts"),
        }
    }
}

/// One file held open by a process.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Descriptor number or special slot.
    pub assoc: Association,
    /// Symlink target of the `/proc` entry (resolved name).
    pub name: String,
    /// Raw `st_mode` bits at the moment of resolution.
    pub mode: u32,
    /// Containing device as (major, minor), from `st_dev`.
    pub dev: (u32, u32),
    /// Inode number.
    pub ino: u64,
    /// Classification variant, fixed at creation.
    pub class: FileClass,
    /// Device identity as (major, minor) from `st_rdev`. Only the device
    /// variants carry this payload.
    pub rdev: Option<(u32, u32)>,
}

/// One scanned process and the files it holds open.
#[derive(Debug, Clone)]
pub struct ProcRecord {
    /// Process ID, unique within the snapshot.
    pub pid: ProcessId,
    /// Command name from `/proc/<pid>/comm`, resolved once.
    pub command: String,
    /// Real UID from `/proc/<pid>/status`, when readable.
    pub uid: Option<u32>,
    /// Files in discovery order.
    pub files: Vec<FileEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn association_display_names_match_proc_entries() {
        assert_eq!(Association::Cwd.to_string(), "cwd");
        assert_eq!(Association::NsPidForChildren.to_string(), "pid_for_children");
        assert_eq!(Association::Fd(7).to_string(), "7");
    }

    #[test]
    fn only_descriptor_associations_have_fd_numbers() {
        assert_eq!(Association::Fd(0).fd(), Some(0));
        assert_eq!(Association::Exe.fd(), None);
        for assoc in Association::NAMESPACES {
            assert_eq!(assoc.fd(), None);
        }
    }

    #[test]
    fn special_slots_are_distinct() {
        let mut all: Vec<Association> = Association::CLASSICAL
            .into_iter()
            .chain(Association::NAMESPACES)
            .collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 13);
    }
}
