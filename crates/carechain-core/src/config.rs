//! Dashboard configuration.
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! ipfs_gateway = "https://gateway.pinata.cloud/ipfs"
//! notification_refresh_secs = 30
//! top_doctor_count = 5
//! low_stock_threshold = 10
//! database_path = "carechain.db"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base URL profile pointers are resolved against
    pub ipfs_gateway: String,
    /// How often the notification feed polls
    pub notification_refresh_secs: u64,
    /// Length of the top-doctors ranking
    pub top_doctor_count: usize,
    /// Active medicines below this quantity count as low stock
    pub low_stock_threshold: u64,
    /// Local ledger database; in-memory when unset
    pub database_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            ipfs_gateway: "https://ipfs.io/ipfs".to_string(),
            notification_refresh_secs: 30,
            top_doctor_count: 5,
            low_stock_threshold: 10,
            database_path: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notification_refresh_secs == 0 {
            return Err(ConfigError::Invalid(
                "notification_refresh_secs must be at least 1".into(),
            ));
        }
        if !self.ipfs_gateway.starts_with("http://") && !self.ipfs_gateway.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "ipfs_gateway must be an http(s) URL, got {:?}",
                self.ipfs_gateway
            )));
        }
        Ok(())
    }

    pub fn notification_refresh(&self) -> Duration {
        Duration::from_secs(self.notification_refresh_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.notification_refresh(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_override() {
        let config = DashboardConfig::from_toml_str(
            r#"
            ipfs_gateway = "https://gateway.pinata.cloud/ipfs"
            top_doctor_count = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.top_doctor_count, 3);
        assert_eq!(config.low_stock_threshold, 10);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            DashboardConfig::from_toml_str("notification_refresh_secs = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DashboardConfig::from_toml_str(r#"ipfs_gateway = "ftp://x""#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DashboardConfig::from_toml_str("top_doctor_count = \"five\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "low_stock_threshold = 25").unwrap();
        writeln!(file, "database_path = \"ledger.db\"").unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.low_stock_threshold, 25);
        assert_eq!(config.database_path, Some(PathBuf::from("ledger.db")));

        let missing = DashboardConfig::load("/nonexistent/carechain.toml");
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
