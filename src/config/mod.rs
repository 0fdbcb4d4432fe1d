//! Configuration management for gqltable.
//!
//! Settings live in `<config_dir>/gqltable/config.toml`. A missing file is
//! created with defaults on first load; command line flags are layered on
//! top by the binary.

mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use settings::{BackendSettings, Settings};

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    #[error("could not create configuration directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    #[error("could not read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("could not write configuration file: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("invalid configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("could not serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("{0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub settings: Settings,
    pub backend: BackendSettings,
}

impl Config {
    /// Default location of the configuration file.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("gqltable").join("config.toml"))
    }

    /// Load from the default location, creating it with defaults if missing.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, creating it with defaults if missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No configuration found, writing defaults");
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(ConfigError::WriteError)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.settings.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "settings.page_size must be at least 1".to_string(),
            ));
        }

        if self.settings.cache_max_entries == 0 {
            return Err(ConfigError::ValidationError(
                "settings.cache_max_entries must be at least 1".to_string(),
            ));
        }

        if let Some(endpoint) = &self.backend.endpoint {
            if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
                return Err(ConfigError::ValidationError(format!(
                    "backend.endpoint '{}' must start with http:// or https://",
                    endpoint
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FetchPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.settings.page_size, 10);
        assert!(config.settings.vim_mode);
        assert_eq!(config.settings.fetch_policy, FetchPolicy::CacheFirst);
        assert_eq!(config.backend.seed_rows, 3);
        assert_eq!(config.backend.endpoint, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.settings.page_size = 25;
        config.settings.fetch_policy = FetchPolicy::NoCache;
        config.backend.endpoint = Some("http://localhost:4000/graphql".to_string());
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings]\nfetch_policy = \"network-only\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.settings.fetch_policy, FetchPolicy::NetworkOnly);
        assert_eq!(config.settings.page_size, 10);
        assert_eq!(config.backend.latency_ms, 300);
    }

    #[test]
    fn test_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings\npage_size = ").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validate_page_size() {
        let mut config = Config::default();
        config.settings.page_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_cache_settings_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings]\ncache_ttl_secs = 30\ncache_max_entries = 8\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.settings.cache_ttl_secs, Some(30));
        assert_eq!(config.settings.cache_max_entries, 8);
        assert!(config.settings.query_cache().is_empty());
    }

    #[test]
    fn test_validate_cache_max_entries() {
        let mut config = Config::default();
        config.settings.cache_max_entries = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_endpoint_scheme() {
        let mut config = Config::default();
        config.backend.endpoint = Some("localhost:4000".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http://"));
    }
}
