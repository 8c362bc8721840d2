//! The output column catalog and selection parsing.
//!
//! Ten columns exist. Selection is an ordered, comma-separated list of
//! names matched case-insensitively against the catalog; an unknown name is
//! a fatal configuration error raised before any collection work starts.

use fdscan_common::{Error, Result};

/// Identifier of a selectable output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Assoc,
    Command,
    Device,
    Fd,
    Inode,
    Name,
    Pid,
    Type,
    Uid,
    User,
}

/// Value type a column carries in JSON output. Ignored by the plain and
/// raw renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    String,
    Number,
}

/// Static metadata for one catalog column.
#[derive(Debug)]
pub struct ColumnInfo {
    /// Display name, also the match key for `-o`.
    pub name: &'static str,
    /// Minimum width in plain output; content may widen the column.
    pub width_hint: usize,
    /// Right-align in plain output.
    pub right_align: bool,
    /// Value type for the JSON renderer.
    pub json: JsonType,
    /// Help text for the usage screen.
    pub help: &'static str,
}

impl ColumnId {
    /// Every catalog column, in catalog order.
    pub const ALL: [ColumnId; 10] = [
        ColumnId::Assoc,
        ColumnId::Command,
        ColumnId::Device,
        ColumnId::Fd,
        ColumnId::Inode,
        ColumnId::Name,
        ColumnId::Pid,
        ColumnId::Type,
        ColumnId::Uid,
        ColumnId::User,
    ];

    /// Catalog metadata for this column.
    pub fn info(self) -> &'static ColumnInfo {
        match self {
            ColumnId::Assoc => &ColumnInfo {
                name: "ASSOC",
                width_hint: 0,
                right_align: true,
                json: JsonType::String,
                help: "association between file and process",
            },
            ColumnId::Command => &ColumnInfo {
                name: "COMMAND",
                width_hint: 0,
                right_align: false,
                json: JsonType::String,
                help: "command of the process opening the file",
            },
            ColumnId::Device => &ColumnInfo {
                name: "DEVICE",
                width_hint: 0,
                right_align: true,
                json: JsonType::String,
                help: "device major and minor number",
            },
            ColumnId::Fd => &ColumnInfo {
                name: "FD",
                width_hint: 0,
                right_align: true,
                json: JsonType::Number,
                help: "file descriptor for the file",
            },
            ColumnId::Inode => &ColumnInfo {
                name: "INODE",
                width_hint: 0,
                right_align: true,
                json: JsonType::Number,
                help: "inode number",
            },
            ColumnId::Name => &ColumnInfo {
                name: "NAME",
                width_hint: 0,
                right_align: false,
                json: JsonType::String,
                help: "name of the file",
            },
            ColumnId::Pid => &ColumnInfo {
                name: "PID",
                width_hint: 0,
                right_align: true,
                json: JsonType::Number,
                help: "PID of the process opening the file",
            },
            ColumnId::Type => &ColumnInfo {
                name: "TYPE",
                width_hint: 0,
                right_align: true,
                json: JsonType::String,
                help: "file type",
            },
            ColumnId::Uid => &ColumnInfo {
                name: "UID",
                width_hint: 0,
                right_align: true,
                json: JsonType::Number,
                help: "user ID number",
            },
            ColumnId::User => &ColumnInfo {
                name: "USER",
                width_hint: 0,
                right_align: true,
                json: JsonType::String,
                help: "user of the process",
            },
        }
    }

    /// Case-insensitive exact-match lookup against the catalog.
    pub fn from_name(name: &str) -> Option<ColumnId> {
        ColumnId::ALL
            .into_iter()
            .find(|id| id.info().name.eq_ignore_ascii_case(name))
    }
}

/// The fixed default selection used when `-o` is absent.
pub fn default_columns() -> Vec<ColumnId> {
    vec![
        ColumnId::Command,
        ColumnId::Pid,
        ColumnId::User,
        ColumnId::Assoc,
        ColumnId::Type,
        ColumnId::Device,
        ColumnId::Inode,
        ColumnId::Name,
    ]
}

/// Parse a user-supplied column list, preserving order. The first unknown
/// token aborts with a fatal error naming it.
pub fn parse_selection(list: &str) -> Result<Vec<ColumnId>> {
    list.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            ColumnId::from_name(token).ok_or_else(|| Error::UnknownColumn(token.to_string()))
        })
        .collect()
}

/// One projected column value. Numbers and strings are kept apart so the
/// JSON renderer can emit them with the right type; empty cells are columns
/// no classification variant claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Str(String),
    Num(u64),
}

impl Cell {
    /// Textual form for the plain and raw renderers.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Str(s) => s.clone(),
            Cell::Num(n) => n.to_string(),
        }
    }

    /// JSON form, honoring the column's declared value type.
    pub fn to_json(&self, ty: JsonType) -> serde_json::Value {
        match (self, ty) {
            (Cell::Empty, _) => serde_json::Value::Null,
            (Cell::Num(n), JsonType::Number) => serde_json::Value::from(*n),
            (Cell::Num(n), JsonType::String) => serde_json::Value::from(n.to_string()),
            (Cell::Str(s), _) => serde_json::Value::from(s.clone()),
        }
    }
}
