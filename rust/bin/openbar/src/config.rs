//! Client-side settings.
//!
//! Reads/writes `~/.openbar/config.toml`.

use std::path::{Path, PathBuf};

use openbar_core::ServiceConfig;
use serde::{Deserialize, Serialize};

/// Client configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Where the bar keeps its database and datasets.
    /// Empty means the default `~/.openbar` directory.
    #[serde(rename = "data-dir", default, skip_serializing_if = "String::is_empty")]
    pub data_dir: String,
}

impl ClientConfig {
    /// Default config file path: ~/.openbar/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolved data directory: the configured one, or ~/.openbar.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if self.data_dir.is_empty() {
            dirs_path()
        } else {
            PathBuf::from(&self.data_dir)
        }
    }

    /// Storage configuration for opening the service.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            data_dir: Some(self.resolved_data_dir()),
            ..Default::default()
        }
    }
}

/// Return the OpenBar config directory (~/.openbar).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".openbar")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.data_dir.is_empty());
        let db = config.service_config().resolve_db_path();
        assert!(db.ends_with(".openbar/data.redb"));
    }

    #[test]
    fn test_roundtrip() {
        let mut config = ClientConfig::default();
        config.data_dir = "/srv/openbar".to_string();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: ClientConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.data_dir, "/srv/openbar");
        assert_eq!(
            back.service_config().resolve_db_path(),
            PathBuf::from("/srv/openbar/data.redb")
        );
    }
}
