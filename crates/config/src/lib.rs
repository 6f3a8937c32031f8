//! linkd configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! A missing or empty config file yields a fully usable configuration -
//! only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use linkd_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[server]\nport = 3000").unwrap();
//! assert_eq!(config.server.port, 3000);
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! request_timeout = "30s"
//! shutdown_timeout = "10s"
//!
//! [probe]
//! timeout = "30s"
//!
//! [storage]
//! dir = "data"
//!
//! [logging]
//! level = "info"
//! ```

mod error;
mod logging;
mod probe;
mod server;
mod storage;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogLevel};
pub use probe::ProbeConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Top-level linkd configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Link probe settings
    pub probe: ProbeConfig,

    /// Record storage settings
    pub storage: StorageConfig,

    /// Logging settings
    pub logging: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        raw.parse()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
