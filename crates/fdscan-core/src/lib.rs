//! fdscan - list the files every process holds open.
//!
//! The pipeline has four phases, strictly ordered:
//! 1. [`collect`] walks `/proc` with a fixed worker pool and produces
//!    classified, immutable process/file records.
//! 2. [`classify`] interprets raw metadata into variants with fallback
//!    rendering (used both during collection and projection).
//! 3. [`project`] turns records into typed rows through the column catalog.
//! 4. [`output`] renders rows as plain, raw, or JSON text.
//!
//! stdout carries the report; stderr carries logs.

pub mod classify;
pub mod collect;
pub mod column;
pub mod exit_codes;
pub mod output;
pub mod project;
pub mod users;

pub use collect::{collect, Association, CollectOptions, FileEntry, ProcRecord, DEFAULT_WORKERS};
pub use column::{default_columns, parse_selection, Cell, ColumnId};
pub use exit_codes::ExitCode;
pub use output::{render, RenderOptions};
pub use project::project;
pub use users::UserCache;
