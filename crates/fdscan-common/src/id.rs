//! Process identity types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Process ID wrapper with display formatting.
///
/// PIDs are externally assigned by the kernel and unique within one
/// snapshot because they come from distinct `/proc` directory names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(pub u32);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProcessId {
    fn from(pid: u32) -> Self {
        ProcessId(pid)
    }
}
