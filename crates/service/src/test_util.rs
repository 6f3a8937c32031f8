//! Test support
//!
//! A scripted [`Probe`] implementation so pipeline and API tests never
//! touch the network.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use linkd_store::LinkStatus;

use crate::prober::Probe;

/// Probe returning pre-scripted statuses and recording every call
#[derive(Default)]
pub struct StaticProbe {
    statuses: HashMap<String, LinkStatus>,
    calls: Mutex<Vec<String>>,
}

impl StaticProbe {
    /// A probe that classifies every link `not available`
    pub fn new() -> Self {
        Self::default()
    }

    /// A probe that classifies the given links `available`
    pub fn available(links: &[&str]) -> Self {
        let mut probe = Self::new();
        for link in links {
            probe = probe.with_status(link, LinkStatus::Available);
        }
        probe
    }

    /// Script the status returned for one link
    pub fn with_status(mut self, link: &str, status: LinkStatus) -> Self {
        self.statuses.insert(link.to_string(), status);
        self
    }

    /// Links probed so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of probe calls made
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Probe for StaticProbe {
    async fn probe(&self, link: &str) -> LinkStatus {
        self.calls.lock().push(link.to_string());
        self.statuses
            .get(link)
            .copied()
            .unwrap_or(LinkStatus::NotAvailable)
    }
}
