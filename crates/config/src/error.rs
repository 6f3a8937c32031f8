//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_includes_path() {
        let err = ConfigError::Io {
            path: "/etc/linkd/linkd.toml".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("/etc/linkd/linkd.toml"));
    }

    #[test]
    fn test_parse_error_from_toml() {
        let err: ConfigError = toml::from_str::<crate::Config>("server = 3")
            .unwrap_err()
            .into();
        assert!(err.to_string().contains("failed to parse config"));
    }
}
