//! Record processing pipeline
//!
//! One [`Processor::process`] call handles one submitted batch. Two
//! independent cancellation scopes are passed in explicitly:
//!
//! - `shutdown`: the service-lifetime scope, checked once per batch. A
//!   batch that arrives after shutdown began is parked in the pending log
//!   unclassified and replayed on the next startup.
//! - `request`: the batch-lifetime scope (deadline or client disconnect),
//!   checked cooperatively before each probe.
//!
//! Exactly one of four outcomes leaves a call: a finished record, the
//! distinguished stopping outcome, a cancellation error with no persisted
//! side effect, or a persistence error with no persisted side effect.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use linkd_store::{FileStore, LinkStatuses, Record};

use crate::error::{Result, ServiceError};
use crate::prober::Probe;

/// Outcome of a successfully handled batch
#[derive(Debug, Clone, PartialEq)]
pub enum Processed {
    /// Every link was probed and the record is in the primary log
    Complete(Record),

    /// The service is stopping: the batch was parked in the pending log
    /// and every link is reported `unknown`
    Stopping(Record),
}

impl Processed {
    /// The record carried by either outcome
    pub fn record(&self) -> &Record {
        match self {
            Self::Complete(record) | Self::Stopping(record) => record,
        }
    }
}

/// Orchestrates allocation, cancellation checks, probing, and persistence
pub struct Processor {
    store: Arc<FileStore>,
    prober: Arc<dyn Probe>,
}

impl Processor {
    pub fn new(store: Arc<FileStore>, prober: Arc<dyn Probe>) -> Self {
        Self { store, prober }
    }

    pub(crate) fn store(&self) -> &FileStore {
        &self.store
    }

    pub(crate) fn prober(&self) -> &dyn Probe {
        self.prober.as_ref()
    }

    /// Process one batch of links
    pub async fn process(
        &self,
        shutdown: &CancellationToken,
        request: &CancellationToken,
        links: &[String],
    ) -> Result<Processed> {
        if shutdown.is_cancelled() {
            let pending = self.store.append_pending(links.to_vec()).map_err(|err| {
                error!(error = %err, "failed to park batch in pending log");
                err
            })?;
            info!(
                id = pending.id,
                links = links.len(),
                "service stopping, batch parked for replay"
            );
            return Ok(Processed::Stopping(Record::with_unknown_links(
                pending.id, links,
            )));
        }

        let mut statuses = LinkStatuses::new();
        for link in links {
            if request.is_cancelled() {
                info!(link = %link, "request cancelled before probe");
                return Err(ServiceError::Cancelled);
            }
            statuses.insert(link.clone(), self.prober.probe(link).await);
        }

        let record = self.store.append_record(statuses).map_err(|err| {
            error!(error = %err, "failed to append record");
            err
        })?;
        info!(id = record.id, links = record.links.len(), "batch processed");

        Ok(Processed::Complete(record))
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
