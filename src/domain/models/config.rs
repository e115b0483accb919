//! Main configuration structure for Crucible.

use serde::{Deserialize, Serialize};

use super::settings::Settings;

/// Top-level configuration, assembled by the loader from defaults,
/// project config files, and environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Model provider connection settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Pipeline settings (per-role models, temperature, verbosity)
    #[serde(default)]
    pub settings: Settings,

    /// History persistence settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Model provider configuration. Credentials are process-wide, never
/// supplied per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProviderConfig {
    /// API key. Empty here means "take it from GEMINI_API_KEY".
    #[serde(default)]
    pub api_key: String,

    /// Base URL for the Generative Language API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    300
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// History persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HistoryConfig {
    /// Path to the serialized history file
    #[serde(default = "default_history_path")]
    pub path: String,
}

fn default_history_path() -> String {
    ".crucible/history.json".to_string()
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.provider.base_url,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(config.provider.timeout_secs, 300);
        assert_eq!(config.history.path, ".crucible/history.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_deserializes_with_partial_sections() {
        let yaml_as_json = r#"{"history": {"path": "/tmp/h.json"}}"#;
        let config: Config = serde_json::from_str(yaml_as_json).unwrap();
        assert_eq!(config.history.path, "/tmp/h.json");
        assert_eq!(config.provider.timeout_secs, 300);
        assert_eq!(config.settings.max_steps, 10);
    }
}
