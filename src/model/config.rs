//! Application configuration structures

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::path::expand_tilde;

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub backup: BackupConfig,
    #[serde(default)]
    pub integration: IntegrationConfig,
}

/// UI configuration options
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
    #[serde(default = "default_true")]
    pub show_descriptions: bool,
}

fn default_true() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            confirm_delete: true,
            show_descriptions: true,
        }
    }
}

/// Registry storage location
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// Registry file; defaults to `~/.alix/aliases.json`
    pub path: Option<String>,
}

/// Backup configuration
///
/// Backups are kept indefinitely unless `max_count` is set.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct BackupConfig {
    pub max_count: Option<usize>,
}

/// Shell integration options
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IntegrationConfig {
    /// Write newly added aliases into the startup file right away
    #[serde(default = "default_true")]
    pub auto_apply: bool,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        IntegrationConfig { auto_apply: true }
    }
}

impl Config {
    /// Get the alix data directory path (`~/.alix`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("~"))
            .join(".alix")
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Get the backups directory path
    pub fn backups_dir() -> PathBuf {
        Self::config_dir().join("backups")
    }

    /// Registry file, honouring `storage.path`
    pub fn registry_path(&self) -> PathBuf {
        self.storage
            .path
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| Self::config_dir().join("aliases.json"))
    }

    /// Load configuration from the default path, or return default if the file doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}
