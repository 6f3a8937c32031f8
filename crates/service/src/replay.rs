//! Pending log replay
//!
//! Runs once at startup, before the intake boundary accepts traffic.
//! Pending records carry no statuses, so every link is probed from scratch
//! and the finished record gets a fresh identifier - the identifier stamped
//! when the batch was parked is superseded (recovery only scans the primary
//! log, so it was never accounted for).

use tracing::{debug, info, warn};

use linkd_store::LinkStatuses;

use crate::error::Result;
use crate::pipeline::Processor;

/// Counts from one replay pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    /// Pending entries converted into primary records
    pub replayed: usize,

    /// Entries whose persistence failed, re-queued for the next startup
    pub requeued: usize,
}

impl Processor {
    /// Drain the pending log into the primary log
    ///
    /// A single entry's persistence failure does not abort the pass: the
    /// entry is kept and re-queued when the log is truncated, so only
    /// successfully replayed entries are cleared.
    pub async fn replay_pending(&self) -> Result<ReplayStats> {
        let pending = self.store().read_pending()?;
        if pending.is_empty() {
            debug!("pending log empty, nothing to replay");
            return Ok(ReplayStats::default());
        }

        let mut replayed = 0usize;
        let mut failed = Vec::new();
        for entry in pending {
            let mut statuses = LinkStatuses::new();
            for link in &entry.links {
                statuses.insert(link.clone(), self.prober().probe(link).await);
            }

            match self.store().append_record(statuses) {
                Ok(record) => {
                    replayed += 1;
                    info!(
                        pending_id = entry.id,
                        id = record.id,
                        "replayed pending record"
                    );
                }
                Err(err) => {
                    warn!(
                        pending_id = entry.id,
                        error = %err,
                        "failed to replay pending record, re-queueing"
                    );
                    failed.push(entry);
                }
            }
        }

        let requeued = failed.len();
        self.store().truncate_pending(&failed)?;
        info!(replayed, requeued, "pending log drained");

        Ok(ReplayStats { replayed, requeued })
    }
}

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;
