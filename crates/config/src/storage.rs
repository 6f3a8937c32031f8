//! Record storage configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Record storage configuration
///
/// The store keeps two newline-delimited JSON files under one directory:
/// the primary record log and the pending log for batches accepted during
/// shutdown.
///
/// # Example
///
/// ```toml
/// [storage]
/// dir = "/var/lib/linkd"
/// records_file = "records.jsonl"
/// pending_file = "pending.jsonl"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding both log files
    /// Default: "data"
    pub dir: PathBuf,

    /// Primary record log file name
    /// Default: "records.jsonl"
    pub records_file: String,

    /// Pending record log file name
    /// Default: "pending.jsonl"
    pub pending_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            records_file: "records.jsonl".to_string(),
            pending_file: "pending.jsonl".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorageConfig::default();
        assert_eq!(config.dir, PathBuf::from("data"));
        assert_eq!(config.records_file, "records.jsonl");
        assert_eq!(config.pending_file, "pending.jsonl");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: StorageConfig = toml::from_str("dir = \"/var/lib/linkd\"").unwrap();
        assert_eq!(config.dir, PathBuf::from("/var/lib/linkd"));
        assert_eq!(config.records_file, "records.jsonl");
    }
}
