//! Keymap configuration file.

use crate::error::ConfigError;
use crate::types::{KeymapEntry, LogLevel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration loaded from `keymap.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Verbosity of the debug log file
    pub log_level: LogLevel,
    /// Shortcut definitions, in priority order (first match wins)
    pub shortcuts: Vec<KeymapEntry>,
}

impl RelayConfig {
    /// Load configuration from the default path.
    ///
    /// A missing file yields the default (empty) configuration.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Keymap path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!("Keymap not found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading keymap from {:?}", path);

        let contents = fs::read_to_string(path)?;
        let config: RelayConfig = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;

        log::info!(
            "Keymap loaded with {} shortcut entries",
            config.shortcuts.len()
        );
        Ok(config)
    }

    /// Save configuration to an explicit path, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Check semantic constraints that serde cannot express.
    ///
    /// Every entry needs a non-empty action id and either a key string or a
    /// caption to derive the combination from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, entry) in self.shortcuts.iter().enumerate() {
            if entry.action.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "shortcuts[{}]: action must not be empty",
                    index
                )));
            }
            if entry.key.is_none() && entry.caption.is_none() {
                return Err(ConfigError::Validation(format!(
                    "shortcuts[{}] ('{}'): needs a key or a shorthand caption",
                    index, entry.action
                )));
            }
        }
        Ok(())
    }

    /// Get the keymap file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("keymap.yaml")
    }

    /// Get the configuration directory.
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("shortcut-relay")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("shortcut-relay")
            } else {
                PathBuf::from(".")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let config = RelayConfig::default();
        assert_eq!(config.log_level, LogLevel::Off);
        assert!(config.shortcuts.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_action() {
        let config = RelayConfig {
            shortcuts: vec![KeymapEntry {
                key: Some("Ctrl+S".to_string()),
                action: "  ".to_string(),
                caption: None,
            }],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_requires_key_or_caption() {
        let config = RelayConfig {
            shortcuts: vec![KeymapEntry {
                key: None,
                action: "save".to_string(),
                caption: None,
            }],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("save"));
    }

    #[test]
    fn test_config_path_file_name() {
        assert!(RelayConfig::config_path().ends_with("keymap.yaml"));
    }
}
