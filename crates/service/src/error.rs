//! Service error types

use thiserror::Error;

use linkd_store::StoreError;

/// Result type for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can escape the record processing pipeline
///
/// Per-link transport failures never appear here - the prober absorbs them
/// into a `not available` status. Only cancellation and persistence
/// failures propagate to the caller.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The batch-lifetime scope was cancelled before the batch finished
    #[error("request cancelled")]
    Cancelled,

    /// A record could not be persisted
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The shared HTTP client could not be constructed
    #[error("failed to build probe client: {0}")]
    Client(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_display() {
        assert_eq!(ServiceError::Cancelled.to_string(), "request cancelled");
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err = ServiceError::Store(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        )));
        assert!(err.to_string().contains("denied"));
    }
}
