//! Link probe configuration

use serde::Deserialize;
use std::time::Duration;

/// Link probe configuration
///
/// One timeout is configured per process and shared by every probe.
///
/// # Example
///
/// ```toml
/// [probe]
/// timeout = "30s"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Upper bound for a single reachability check (HEAD or GET)
    /// Default: 30s
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}
