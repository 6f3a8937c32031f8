//! Record data model
//!
//! Two entities are persisted, both as single JSON lines:
//!
//! - [`Record`]: a fully classified batch - every link carries a status.
//! - [`PendingRecord`]: a batch accepted while the service was shutting
//!   down, persisted without classification for replay on the next startup.
//!
//! Both are immutable once written; the logs are append-only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reachability classification of a single link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkStatus {
    /// The final probe attempt returned 200 OK
    #[serde(rename = "available")]
    Available,

    /// Any other status code or a transport failure
    #[serde(rename = "not available")]
    NotAvailable,

    /// Never probed - the batch arrived during shutdown
    #[serde(rename = "unknown")]
    Unknown,
}

/// Link-to-status classification of one batch
///
/// A `BTreeMap` keeps serialization deterministic; duplicates in the input
/// collapse onto one key, last probe wins.
pub type LinkStatuses = BTreeMap<String, LinkStatus>;

/// A persisted, fully classified batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Link to reachability status
    pub links: LinkStatuses,

    /// Monotonically increasing record identifier
    #[serde(rename = "links_num")]
    pub id: i64,
}

impl Record {
    /// Build a record that marks every input link `unknown`
    ///
    /// Used for batches accepted during shutdown: the links are parked in
    /// the pending log unclassified, and this record is what the caller
    /// gets back for observability.
    pub fn with_unknown_links(id: i64, links: &[String]) -> Self {
        Self {
            links: links
                .iter()
                .map(|link| (link.clone(), LinkStatus::Unknown))
                .collect(),
            id,
        }
    }
}

/// A batch accepted during shutdown, persisted without statuses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingRecord {
    /// Links in the order they were submitted
    pub links: Vec<String>,

    /// Identifier allocated when the batch was parked
    ///
    /// Replay assigns the finished record a fresh identifier; this one is
    /// superseded (see the store docs on recovery).
    #[serde(rename = "links_num")]
    pub id: i64,
}
