use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid temperature: {0}. Must be between 0.0 and 2.0")]
    InvalidTemperature(f32),

    #[error("Model identifier for {0} cannot be empty")]
    EmptyModel(&'static str),

    #[error("History path cannot be empty")]
    EmptyHistoryPath,

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .crucible/config.yaml (project config)
    /// 3. .crucible/local.yaml (project local overrides, optional)
    /// 4. Environment variables (CRUCIBLE_* prefix, highest priority)
    ///
    /// The provider API key additionally falls back to GEMINI_API_KEY at
    /// client construction time, so it never has to live in a file.
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".crucible/config.yaml"))
            .merge(Yaml::file(".crucible/local.yaml"))
            .merge(Env::prefixed("CRUCIBLE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&config.settings.temperature) {
            return Err(ConfigError::InvalidTemperature(config.settings.temperature));
        }

        for (name, model) in [
            ("planner", &config.settings.planner_model),
            ("researcher", &config.settings.researcher_model),
            ("executive", &config.settings.executive_model),
            ("critic", &config.settings.critic_model),
        ] {
            if model.is_empty() {
                return Err(ConfigError::EmptyModel(name));
            }
        }

        if config.history.path.is_empty() {
            return Err(ConfigError::EmptyHistoryPath);
        }

        if config.provider.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.provider.timeout_secs));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
