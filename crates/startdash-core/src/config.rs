//! Dashboard configuration persistence
//!
//! Loaded from `config.json` in the platform config directory. A missing or
//! broken file yields defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::storage::{default_data_dir, APP_DIR_NAME};

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashConfig {
    /// Where credentials, settings and logs are kept
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// How long the welcome screen stays up
    #[serde(default = "default_welcome_delay_ms")]
    pub welcome_delay_ms: u64,

    /// System statistics refresh interval
    #[serde(default = "default_poll_ms")]
    pub stats_interval_ms: u64,

    /// Media session poll interval
    #[serde(default = "default_poll_ms")]
    pub media_interval_ms: u64,

    /// Keep the lockout across restarts
    #[serde(default)]
    pub persist_lockout: bool,

    /// Log file (defaults to `startdash.log` in the data directory)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_welcome_delay_ms() -> u64 {
    1500
}

fn default_poll_ms() -> u64 {
    2000
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            welcome_delay_ms: default_welcome_delay_ms(),
            stats_interval_ms: default_poll_ms(),
            media_interval_ms: default_poll_ms(),
            persist_lockout: false,
            log_file: None,
        }
    }
}

impl DashConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        // Try XDG_CONFIG_HOME first, then fall back to ~/.config
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg_config).join(APP_DIR_NAME));
        }

        dirs::config_dir().map(|p| p.join(APP_DIR_NAME))
    }

    /// Get the full config file path
    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file: {}", e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_file_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(path, contents).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn welcome_delay(&self) -> Duration {
        Duration::from_millis(self.welcome_delay_ms)
    }

    pub fn stats_interval(&self) -> Duration {
        Duration::from_millis(self.stats_interval_ms)
    }

    pub fn media_interval(&self) -> Duration {
        Duration::from_millis(self.media_interval_ms)
    }

    /// Log file location
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("startdash.log"))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = DashConfig::default();
        assert_eq!(config.welcome_delay(), Duration::from_millis(1500));
        assert_eq!(config.stats_interval(), Duration::from_secs(2));
        assert!(!config.persist_lockout);
        assert!(config.log_path().ends_with("startdash.log"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "persist_lockout": true, "welcome_delay_ms": 0 }"#).unwrap();

        let config = DashConfig::load_from(&path);
        assert!(config.persist_lockout);
        assert_eq!(config.welcome_delay_ms, 0);
        assert_eq!(config.media_interval_ms, 2000);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = DashConfig {
            data_dir: dir.path().to_path_buf(),
            log_file: Some(dir.path().join("custom.log")),
            ..DashConfig::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(DashConfig::load_from(&path), config);
    }

    #[test]
    fn test_broken_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{{{").unwrap();

        assert_eq!(DashConfig::load_from(&path), DashConfig::default());
    }
}
