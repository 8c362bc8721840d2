//! Concurrent collection of the process table and per-process file state.
//!
//! The flow is registry → scheduler → enumerator: [`registry`] builds the
//! ordered PID list, [`scheduler`] fans it out to a fixed worker pool, and
//! the enumerator resolves each process's special associations and open
//! descriptors into classified [`types::FileEntry`] records. After the
//! scheduler's join barrier every record is immutable.

mod enumerate;
mod registry;
mod scheduler;
pub mod types;

pub use scheduler::{collect, CollectOptions, DEFAULT_WORKERS};
pub use types::{Association, FileEntry, ProcRecord};
