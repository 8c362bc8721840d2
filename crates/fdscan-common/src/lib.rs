//! fdscan common types, IDs, and errors.
//!
//! This crate provides foundational types shared across fdscan-core modules:
//! - Process identity types
//! - Common error types
//! - Output format specifications

pub mod error;
pub mod id;
pub mod output;

pub use error::{Error, Result};
pub use id::ProcessId;
pub use output::OutputMode;
