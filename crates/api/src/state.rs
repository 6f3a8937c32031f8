//! Application state
//!
//! Shared state for API handlers: the record processor, the
//! service-lifetime cancellation scope, and the per-request deadline.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use linkd_service::Processor;

/// Shared state behind every handler
#[derive(Clone)]
pub struct AppState {
    /// The record processing pipeline
    pub processor: Arc<Processor>,

    /// Service-lifetime scope; cancelled when shutdown begins
    pub shutdown: CancellationToken,

    /// Deadline applied to each incoming batch
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        processor: Arc<Processor>,
        shutdown: CancellationToken,
        request_timeout: Duration,
    ) -> Self {
        Self {
            processor,
            shutdown,
            request_timeout,
        }
    }
}
