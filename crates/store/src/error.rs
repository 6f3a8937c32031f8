//! Store error types

use std::io;
use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while persisting or recovering records
///
/// Decode failures on the read path are absorbed (logged and skipped), so
/// only write-path failures surface here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to open, write, or truncate a log file
    #[error("store io error: {0}")]
    Io(#[from] io::Error),

    /// Failed to serialize a record for appending
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}
