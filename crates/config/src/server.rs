//! HTTP server configuration

use serde::Deserialize;
use std::time::Duration;

/// HTTP server configuration
///
/// # Example
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 8080
/// request_timeout = "30s"
/// shutdown_timeout = "10s"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    /// Default: "127.0.0.1"
    pub host: String,

    /// Listen port
    /// Default: 8080
    pub port: u16,

    /// Per-request deadline for processing a batch of links
    /// Default: 30s
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    /// How long to wait for in-flight requests during shutdown
    /// Default: 10s
    #[serde(with = "humantime_serde")]
    pub shutdown_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout: Duration::from_secs(30),
            shutdown_timeout: Duration::from_secs(10),
        }
    }
}

impl ServerConfig {
    /// The `host:port` address to bind the listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
