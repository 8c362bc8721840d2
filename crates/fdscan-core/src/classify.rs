//! File classification and chain-based column rendering.
//!
//! Classification keys on the `st_mode` format bits captured when the file
//! was probed. Each specialized variant names a fallback parent, forming a
//! single-rooted chain that terminates at [`FileClass::Unknown`]. Rendering
//! walks the chain most-specific-first and takes the first variant that
//! claims the column; a column no variant claims renders empty. The dispatch
//! is cooperative: a specialized variant answers only for the columns it
//! overrides and lets everything else fall through to the root.
//!
//! Adding a file kind means adding a variant here with its parent in
//! `parent()` and its overrides in `fill()`; no call site changes.

use crate::collect::types::{FileEntry, ProcRecord};
use crate::column::{Cell, ColumnId};
use crate::users::UserCache;
use serde::{Deserialize, Serialize};

// st_mode format bits (POSIX S_IFMT family).
const S_IFMT: u32 = 0o170000;
const S_IFSOCK: u32 = 0o140000;
const S_IFLNK: u32 = 0o120000;
const S_IFREG: u32 = 0o100000;
const S_IFBLK: u32 = 0o060000;
const S_IFDIR: u32 = 0o040000;
const S_IFCHR: u32 = 0o020000;
const S_IFIFO: u32 = 0o010000;

/// Classification variant of a file record.
///
/// A closed set today; the chain structure keeps it open to new kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileClass {
    /// Regular file.
    Regular,
    /// Character device.
    CharDevice,
    /// Block device.
    BlockDevice,
    /// Generic root of the fallback chain. Directories, sockets, fifos,
    /// and anything unrecognized classify here directly.
    Unknown,
}

impl FileClass {
    /// Classify raw mode bits. Deterministic: the same mode always yields
    /// the same variant.
    pub fn from_mode(mode: u32) -> FileClass {
        match mode & S_IFMT {
            S_IFREG => FileClass::Regular,
            S_IFCHR => FileClass::CharDevice,
            S_IFBLK => FileClass::BlockDevice,
            _ => FileClass::Unknown,
        }
    }

    /// Fallback parent in the classification chain. `None` only at the root.
    pub fn parent(self) -> Option<FileClass> {
        match self {
            FileClass::Unknown => None,
            _ => Some(FileClass::Unknown),
        }
    }

    /// Column values this variant claims for itself. `None` lets the column
    /// fall through to the parent.
    fn fill(
        self,
        proc: &ProcRecord,
        file: &FileEntry,
        column: ColumnId,
        users: &UserCache,
    ) -> Option<Cell> {
        match self {
            FileClass::Regular => match column {
                ColumnId::Type => Some(Cell::Str("regular".to_string())),
                _ => None,
            },
            FileClass::CharDevice => fill_device(file, column, "character device"),
            FileClass::BlockDevice => fill_device(file, column, "block device"),
            FileClass::Unknown => fill_generic(proc, file, column, users),
        }
    }
}

/// Raw stat fields the classifier consumes.
///
/// The `struct stat` subset the probes carry; split out so classification
/// is testable without a live filesystem object.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawStat {
    pub mode: u32,
    pub dev: u64,
    pub rdev: u64,
    pub ino: u64,
}

#[cfg(unix)]
impl From<&std::fs::Metadata> for RawStat {
    fn from(md: &std::fs::Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        RawStat {
            mode: md.mode(),
            dev: md.dev(),
            rdev: md.rdev(),
            ino: md.ino(),
        }
    }
}

/// Build a typed file record from raw metadata.
///
/// The device variants keep their `st_rdev` identity as variant-private
/// payload; every other variant carries none.
pub fn classify(
    assoc: crate::collect::types::Association,
    name: String,
    st: &RawStat,
) -> FileEntry {
    let class = FileClass::from_mode(st.mode);
    let rdev = match class {
        FileClass::CharDevice | FileClass::BlockDevice => Some(unpack_dev(st.rdev)),
        _ => None,
    };
    FileEntry {
        assoc,
        name,
        mode: st.mode,
        dev: unpack_dev(st.dev),
        ino: st.ino,
        class,
        rdev,
    }
}

/// Resolve one column for one file by walking the classification chain
/// most-specific-to-generic. Returns an empty cell if no variant claims it.
pub fn fill_column(
    proc: &ProcRecord,
    file: &FileEntry,
    column: ColumnId,
    users: &UserCache,
) -> Cell {
    let mut class = Some(file.class);
    while let Some(current) = class {
        if let Some(cell) = current.fill(proc, file, column, users) {
            return cell;
        }
        class = current.parent();
    }
    Cell::Empty
}

/// Split a `dev_t` into (major, minor) using the Linux encoding.
pub fn unpack_dev(dev: u64) -> (u32, u32) {
    let major = ((dev >> 8) & 0xfff) | ((dev >> 32) & !0xfff);
    let minor = (dev & 0xff) | ((dev >> 12) & !0xff);
    (major as u32, minor as u32)
}

fn format_dev((major, minor): (u32, u32)) -> String {
    format!("{},{}", major, minor)
}

/// Shared overrides for the two device variants: type name and the device
/// identity taken from `st_rdev` rather than the containing filesystem.
fn fill_device(file: &FileEntry, column: ColumnId, type_name: &str) -> Option<Cell> {
    match column {
        ColumnId::Type => Some(Cell::Str(type_name.to_string())),
        ColumnId::Device => file.rdev.map(|rdev| Cell::Str(format_dev(rdev))),
        _ => None,
    }
}

/// Root of the chain: default values for every column, from the fields all
/// file records share.
fn fill_generic(
    proc: &ProcRecord,
    file: &FileEntry,
    column: ColumnId,
    users: &UserCache,
) -> Option<Cell> {
    match column {
        ColumnId::Assoc => Some(Cell::Str(file.assoc.to_string())),
        ColumnId::Command => Some(Cell::Str(proc.command.clone())),
        ColumnId::Device => Some(Cell::Str(format_dev(file.dev))),
        ColumnId::Fd => file.assoc.fd().map(|num| Cell::Num(u64::from(num))),
        ColumnId::Inode => Some(Cell::Num(file.ino)),
        ColumnId::Name => Some(Cell::Str(file.name.clone())),
        ColumnId::Pid => Some(Cell::Num(u64::from(proc.pid.0))),
        ColumnId::Type => Some(Cell::Str(generic_type_name(file.mode).to_string())),
        ColumnId::Uid => proc.uid.map(|uid| Cell::Num(u64::from(uid))),
        ColumnId::User => proc.uid.map(|uid| Cell::Str(users.lookup(uid))),
    }
}

fn generic_type_name(mode: u32) -> &'static str {
    match mode & S_IFMT {
        S_IFREG => "regular",
        S_IFDIR => "directory",
        S_IFCHR => "character device",
        S_IFBLK => "block device",
        S_IFSOCK => "socket",
        S_IFIFO => "fifo",
        S_IFLNK => "symbolic link",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::types::Association;
    use fdscan_common::ProcessId;

    fn sample_proc() -> ProcRecord {
        ProcRecord {
            pid: ProcessId(1234),
            command: "bash".to_string(),
            uid: Some(1000),
            files: Vec::new(),
        }
    }

    fn regular_entry() -> FileEntry {
        classify(
            Association::Fd(0),
            "/tmp/a".to_string(),
            &RawStat {
                mode: S_IFREG | 0o644,
                dev: 0x801,
                rdev: 0,
                ino: 999,
            },
        )
    }

    #[test]
    fn mode_classification_is_deterministic() {
        assert_eq!(FileClass::from_mode(S_IFREG | 0o644), FileClass::Regular);
        assert_eq!(FileClass::from_mode(S_IFCHR | 0o666), FileClass::CharDevice);
        assert_eq!(FileClass::from_mode(S_IFBLK | 0o660), FileClass::BlockDevice);
        assert_eq!(FileClass::from_mode(S_IFDIR | 0o755), FileClass::Unknown);
        assert_eq!(FileClass::from_mode(S_IFSOCK), FileClass::Unknown);
        assert_eq!(FileClass::from_mode(S_IFIFO), FileClass::Unknown);
        assert_eq!(FileClass::from_mode(0), FileClass::Unknown);
    }

    #[test]
    fn every_chain_terminates_at_the_generic_root() {
        for class in [
            FileClass::Regular,
            FileClass::CharDevice,
            FileClass::BlockDevice,
            FileClass::Unknown,
        ] {
            let mut depth = 0;
            let mut current = class;
            while let Some(parent) = current.parent() {
                current = parent;
                depth += 1;
            }
            assert_eq!(current, FileClass::Unknown);
            assert!(depth <= 2);
        }
    }

    #[test]
    fn unpack_dev_splits_linux_encoding() {
        assert_eq!(unpack_dev(0x801), (8, 1));
        assert_eq!(unpack_dev(0x103), (1, 3));
        // Large minor spills into the high bits.
        assert_eq!(unpack_dev(0x100000000 | 0x05), (1, 5));
        assert_eq!(unpack_dev(0x400300), (3, 0x400));
    }

    #[test]
    fn regular_file_renders_its_metadata_columns() {
        let proc = sample_proc();
        let file = regular_entry();
        let users = UserCache::from_content("user:x:1000:1000::/home/user:/bin/bash\n");

        assert_eq!(
            fill_column(&proc, &file, ColumnId::Fd, &users),
            Cell::Num(0)
        );
        assert_eq!(
            fill_column(&proc, &file, ColumnId::Type, &users),
            Cell::Str("regular".to_string())
        );
        assert_eq!(
            fill_column(&proc, &file, ColumnId::Inode, &users),
            Cell::Num(999)
        );
        assert_eq!(
            fill_column(&proc, &file, ColumnId::Device, &users),
            Cell::Str("8,1".to_string())
        );
        assert_eq!(
            fill_column(&proc, &file, ColumnId::Name, &users),
            Cell::Str("/tmp/a".to_string())
        );
        assert_eq!(
            fill_column(&proc, &file, ColumnId::User, &users),
            Cell::Str("user".to_string())
        );
    }

    #[test]
    fn char_device_overrides_type_and_device() {
        let proc = sample_proc();
        let users = UserCache::default();
        let file = classify(
            Association::Fd(1),
            "/dev/null".to_string(),
            &RawStat {
                mode: S_IFCHR | 0o666,
                dev: 0x6,
                rdev: 0x103,
                ino: 5,
            },
        );

        assert_eq!(file.class, FileClass::CharDevice);
        assert_eq!(file.rdev, Some((1, 3)));
        assert_eq!(
            fill_column(&proc, &file, ColumnId::Type, &users),
            Cell::Str("character device".to_string())
        );
        // DEVICE comes from st_rdev, not the containing filesystem.
        assert_eq!(
            fill_column(&proc, &file, ColumnId::Device, &users),
            Cell::Str("1,3".to_string())
        );
        // Unclaimed columns fall through to the generic root.
        assert_eq!(
            fill_column(&proc, &file, ColumnId::Name, &users),
            Cell::Str("/dev/null".to_string())
        );
    }

    #[test]
    fn non_device_variants_carry_no_device_payload() {
        assert_eq!(regular_entry().rdev, None);
        let dir = classify(
            Association::Cwd,
            "/home".to_string(),
            &RawStat {
                mode: S_IFDIR | 0o755,
                dev: 0x801,
                rdev: 0,
                ino: 2,
            },
        );
        assert_eq!(dir.class, FileClass::Unknown);
        assert_eq!(dir.rdev, None);
    }

    #[test]
    fn fd_column_is_empty_for_special_associations() {
        let proc = sample_proc();
        let users = UserCache::default();
        let cwd = classify(
            Association::Cwd,
            "/home".to_string(),
            &RawStat {
                mode: S_IFDIR | 0o755,
                dev: 0x801,
                rdev: 0,
                ino: 2,
            },
        );
        assert_eq!(fill_column(&proc, &cwd, ColumnId::Fd, &users), Cell::Empty);
        assert_eq!(
            fill_column(&proc, &cwd, ColumnId::Assoc, &users),
            Cell::Str("cwd".to_string())
        );
        assert_eq!(
            fill_column(&proc, &cwd, ColumnId::Type, &users),
            Cell::Str("directory".to_string())
        );
    }

    #[test]
    fn uid_columns_are_empty_when_uid_is_unreadable() {
        let mut proc = sample_proc();
        proc.uid = None;
        let users = UserCache::default();
        let file = regular_entry();
        assert_eq!(fill_column(&proc, &file, ColumnId::Uid, &users), Cell::Empty);
        assert_eq!(fill_column(&proc, &file, ColumnId::User, &users), Cell::Empty);
    }
}
