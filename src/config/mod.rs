//! Configuration management for padwatch
//!
//! Handles loading, parsing and validating the YAML configuration file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::input::gamepad::{TrackerConfig, DEFAULT_DEAD_ZONE};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub gamepad: GamepadConfig,
}

/// Gamepad configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GamepadConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Only a gamepad whose name contains this (case-insensitive) is tracked
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub product_match: Option<String>,
    #[serde(default = "default_dead_zone")]
    pub dead_zone: f32,
    #[serde(default = "default_frame_rate_hz")]
    pub frame_rate_hz: u32,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            product_match: None,
            dead_zone: default_dead_zone(),
            frame_rate_hz: default_frame_rate_hz(),
        }
    }
}

impl GamepadConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.dead_zone) {
            return Err(ConfigError::InvalidDeadZone(self.dead_zone));
        }
        if self.frame_rate_hz == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(())
    }

    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            dead_zone: self.dead_zone,
        }
    }

    /// Duration of one frame at `frame_rate_hz`
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate_hz.max(1)
    }
}

fn default_true() -> bool {
    true
}

fn default_dead_zone() -> f32 {
    DEFAULT_DEAD_ZONE
}

fn default_frame_rate_hz() -> u32 {
    60
}

impl AppConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AppConfig =
            serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")?;
        config.gamepad.validate().context("Invalid gamepad configuration")?;
        Ok(config)
    }
}

/// Load configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    AppConfig::from_yaml(&content).with_context(|| format!("In config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.gamepad.enabled);
        assert_eq!(config.gamepad.product_match, None);
        assert_eq!(config.gamepad.dead_zone, 0.01);
        assert_eq!(config.gamepad.frame_rate_hz, 60);
        assert_eq!(config.gamepad.tracker_config(), TrackerConfig::default());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = AppConfig::from_yaml("gamepad:\n  product_match: \"Xbox\"\n").unwrap();
        assert_eq!(config.gamepad.product_match.as_deref(), Some("Xbox"));
        assert_eq!(config.gamepad.dead_zone, 0.01);
        assert!(config.gamepad.enabled);

        let empty = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(empty.gamepad.frame_rate_hz, 60);
    }

    #[test]
    fn test_validation() {
        let err = AppConfig::from_yaml("gamepad:\n  dead_zone: 1.5\n").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::InvalidDeadZone(1.5))
        );

        let err = AppConfig::from_yaml("gamepad:\n  frame_rate_hz: 0\n").unwrap_err();
        assert_eq!(err.downcast_ref::<ConfigError>(), Some(&ConfigError::ZeroFrameRate));
    }

    #[test]
    fn test_frame_interval() {
        let config = GamepadConfig {
            frame_rate_hz: 50,
            ..GamepadConfig::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gamepad:\n  enabled: false\n  dead_zone: 0.05").unwrap();

        let config = load_config(file.path()).unwrap();
        assert!(!config.gamepad.enabled);
        assert_eq!(config.gamepad.dead_zone, 0.05);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
