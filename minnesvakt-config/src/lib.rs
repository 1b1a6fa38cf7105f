//! # Minnesvakt Configuration System
//!
//! Hierarchical configuration for the tracked-memory registry and its
//! surrounding tooling.
//!
//! ## Features
//! - **Unified Configuration**: one source of truth for registry sizing and
//!   telemetry
//! - **Validation**: runtime validation of critical parameters
//! - **Layering**: defaults, then a YAML file, then `MINNESVAKT_*`
//!   environment overrides

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod core;
mod error;
mod telemetry;
mod validation;

pub use self::core::{CoreConfig, RegistryConfig};
pub use self::error::ConfigError;
pub use self::telemetry::TelemetryConfig;

/// Top-level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct MinnesvaktConfig {
    /// Registry sizing and behavior.
    #[validate(nested)]
    pub core: CoreConfig,

    /// Logging configuration.
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl MinnesvaktConfig {
    /// Loads configuration from an optional YAML file layered under
    /// `MINNESVAKT_*` environment variables (nested keys separated by `__`).
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let config: MinnesvaktConfig = Figment::new()
            .merge(Serialized::defaults(MinnesvaktConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("MINNESVAKT_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults with environment overrides only, for callers that
    /// run without a configuration file.
    pub fn load_defaults() -> Result<Self, ConfigError> {
        let config: MinnesvaktConfig = Figment::new()
            .merge(Serialized::defaults(MinnesvaktConfig::default()))
            .merge(Env::prefixed("MINNESVAKT_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = MinnesvaktConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.core.registry.initial_slots, 64);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn missing_file_is_reported() {
        let result = MinnesvaktConfig::load_from_path("/nonexistent/minnesvakt.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let path = std::env::temp_dir().join("minnesvakt-config-test.yaml");
        std::fs::write(&path, "core:\n  registry:\n    initial_slots: 8\n").unwrap();

        let config = MinnesvaktConfig::load_from_path(&path).unwrap();
        assert_eq!(config.core.registry.initial_slots, 8);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn out_of_range_sizing_fails_validation() {
        let mut config = MinnesvaktConfig::default();
        config.core.registry.initial_slots = 10_000_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn bogus_log_level_fails_validation() {
        let mut config = MinnesvaktConfig::default();
        config.telemetry.log_level = "loud".into();
        assert!(config.validate().is_err());
    }
}
