//! Configuration for the askgem client.
//!
//! The client works with no config file at all; the defaults point at the
//! local development backend. A JSON file can override any field.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Directory holding askgem's local files.
pub const ASKGEM_DIR: &str = ".askgem";

/// Config file name inside [`ASKGEM_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Origin of the backend (scheme, host and port).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the ask endpoint on the backend.
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,

    /// Seconds to wait for a reply before the exchange is settled as failed.
    /// Must be at least 1.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Whether new messages are stamped with hour:minute.
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,
}

fn default_base_url() -> String {
    "http://localhost:3000".into()
}

fn default_endpoint_path() -> String {
    "/ask-gemini".into()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_timestamps() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint_path: default_endpoint_path(),
            timeout_seconds: default_timeout_seconds(),
            timestamps: default_timestamps(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values that deserialize fine but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "timeout_seconds must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Full URL of the ask endpoint.
    pub fn endpoint_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.endpoint_path.starts_with('/') {
            format!("{base}{}", self.endpoint_path)
        } else {
            format!("{base}/{}", self.endpoint_path)
        }
    }

    /// Exchange timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A field holds a value the client cannot use.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.endpoint_url(), "http://localhost:3000/ask-gemini");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.timestamps);
    }

    #[test]
    fn test_endpoint_url_joins_slashes() {
        let config = Config {
            base_url: "http://example.test:8080/".into(),
            endpoint_path: "ask-gemini".into(),
            ..Config::default()
        };
        assert_eq!(config.endpoint_url(), "http://example.test:8080/ask-gemini");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"timeout_seconds": 5}"#).unwrap();
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.endpoint_path, "/ask-gemini");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ASKGEM_DIR).join(CONFIG_FILE);

        let config = Config {
            base_url: "http://10.0.0.2:3000".into(),
            timestamps: false,
            ..Config::default()
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"timeout_seconds": 0}"#).unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_accepts_any_positive_timeout() {
        for timeout_seconds in [1, 30, u64::MAX] {
            let config = Config {
                timeout_seconds,
                ..Config::default()
            };
            assert!(config.validate().is_ok());
        }
    }
}
