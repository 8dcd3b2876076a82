//! # Engine Configuration
//!
//! TOML-backed configuration for applications built on the engine core.
//! Strong typing with defaults; missing fields fall back to
//! [`EngineConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`EngineConfig`]
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Human-readable application name, used in logs
    pub app_name: String,

    /// Log filter string in `env_logger` syntax (e.g. `"info"` or
    /// `"scene_engine=debug"`)
    pub log_filter: String,

    /// Seconds advanced per simulation step
    pub fixed_timestep: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "scene_engine application".to_string(),
            log_filter: "info".to_string(),
            fixed_timestep: 1.0 / 60.0,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.log_filter, "info");
        assert_relative_eq!(config.fixed_timestep, 1.0 / 60.0);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = EngineConfig::from_toml_str("app_name = \"demo\"").unwrap();
        assert_eq!(config.app_name, "demo");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("fixed_timestep = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
