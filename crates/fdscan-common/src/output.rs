//! Output format specifications.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Supported rendering modes for the report.
///
/// The mode is forwarded unmodified to the renderer; collection behavior
/// is identical regardless of the mode chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Aligned columns with optional headings (default).
    #[default]
    Plain,

    /// Space-separated fields without padding.
    Raw,

    /// JSON object with one record per file.
    Json,
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Plain => write!(f, "plain"),
            OutputMode::Raw => write!(f, "raw"),
            OutputMode::Json => write!(f, "json"),
        }
    }
}
