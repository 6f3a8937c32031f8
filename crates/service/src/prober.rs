//! Link reachability probing
//!
//! One probe call checks one link, synchronously awaited - batches are
//! probed sequentially, and a single probe attempt is authoritative (no
//! retry policy). The probe itself is a HEAD request with one GET fallback
//! when the HEAD fails at the transport level; only an exact `200 OK` from
//! the final attempt classifies a link as available.

use std::borrow::Cow;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use linkd_store::LinkStatus;

use crate::error::Result;

/// A single reachability check of one link
///
/// Implementations absorb transport failures into
/// [`LinkStatus::NotAvailable`] rather than returning errors; a probe
/// outcome is always a status.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Classify one link
    async fn probe(&self, link: &str) -> LinkStatus;
}

/// HTTP prober backed by a shared `reqwest` client
///
/// The timeout is configured once on the client and bounds every attempt;
/// a timed-out probe is `not available`, not an error.
pub struct Prober {
    client: reqwest::Client,
}

impl Prober {
    /// Build a prober whose every request is bounded by `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Probe for Prober {
    async fn probe(&self, link: &str) -> LinkStatus {
        let url = normalize(link);

        let status = match self.client.head(url.as_ref()).send().await {
            Ok(response) => response.status(),
            Err(head_err) => {
                // A transport-level HEAD failure gets a single GET fallback.
                debug!(link, error = %head_err, "head probe failed, falling back to get");
                match self.client.get(url.as_ref()).send().await {
                    Ok(response) => response.status(),
                    Err(err) => {
                        warn!(link, error = %err, "probe failed");
                        return LinkStatus::NotAvailable;
                    }
                }
            }
        };

        if status == StatusCode::OK {
            LinkStatus::Available
        } else {
            debug!(link, status = %status, "link responded with non-ok status");
            LinkStatus::NotAvailable
        }
    }
}

/// Prefix links that carry no explicit scheme with the secure one
fn normalize(link: &str) -> Cow<'_, str> {
    if link.starts_with("http://") || link.starts_with("https://") {
        Cow::Borrowed(link)
    } else {
        Cow::Owned(format!("https://{}", link))
    }
}


#[cfg(test)]
#[path = "prober_test.rs"]
mod prober_test;
