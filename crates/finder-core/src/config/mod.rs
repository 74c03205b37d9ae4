//! Configuration management for Finder.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `finder.toml` file
//! 3. User config `~/.config/finder/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::analysis::RiskLevel;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generative AI service configuration.
    pub llm: LLMConfig,

    /// Storage configuration.
    pub storage: StorageConfig,

    /// Search screen defaults.
    pub search: SearchConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./finder.toml` (project local)
    /// 2. `~/.config/finder/config.toml` (user config)
    /// 3. Falls back to defaults
    ///
    /// Environment overrides are applied in every case.
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(LOCAL_CONFIG_FILE).exists() {
            return Self::from_file(LOCAL_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(APP_DIR_NAME).join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Self::from_env()
    }

    /// Defaults plus environment overrides, validated like a config file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Some(key) = ["FINDER_API_KEY", "GEMINI_API_KEY", "API_KEY"]
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|k| !k.trim().is_empty()))
        {
            self.llm.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("FINDER_MODEL") {
            self.llm.model = Some(model);
        }
        if let Ok(url) = std::env::var("FINDER_BASE_URL") {
            self.llm.base_url = Some(url);
        }
        if let Ok(temperature) = std::env::var("FINDER_TEMPERATURE") {
            if let Ok(t) = temperature.parse() {
                self.llm.temperature = t;
            }
        }

        if let Ok(dir) = std::env::var("FINDER_DATA_DIR") {
            self.storage.data_dir = dir;
        }
    }

    /// Reject values the service would refuse anyway.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Invalid(format!(
                "llm.temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }
        if self.storage.favorites_file.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.favorites_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Generative AI service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LLMConfig {
    /// Model name.
    pub model: Option<String>,

    /// Base URL for the API.
    pub base_url: Option<String>,

    /// API key (can also be set via environment variable).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Sampling temperature.
    pub temperature: f32,

    /// Whether the live web search tool is attached to requests.
    pub search_enabled: bool,

    /// Request timeout in seconds. Unset means wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            model: None,
            base_url: None,
            api_key: None,
            temperature: DEFAULT_TEMPERATURE,
            search_enabled: true,
            timeout_secs: None,
        }
    }
}

impl LLMConfig {
    /// Get the model name, falling back to the default.
    pub fn model_or_default(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
    }

    /// Get the base URL, falling back to the default.
    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string())
    }

    /// Get the API key if one is configured and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base directory for finder data.
    pub data_dir: String,

    /// Favorites file name, relative to `data_dir`.
    pub favorites_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME).to_string_lossy().to_string())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        Self {
            data_dir,
            favorites_file: DEFAULT_FAVORITES_FILE.to_string(),
        }
    }
}

impl StorageConfig {
    /// Full path to the favorites file.
    pub fn favorites_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.favorites_file)
    }

    /// Full path to the log file.
    pub fn log_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(DEFAULT_LOG_FILE)
    }
}

/// Search screen defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Risk profile selected when the search screen opens.
    pub default_profile: RiskLevel,

    /// Filters pre-selected in custom mode.
    pub default_filters: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_profile: RiskLevel::Moderate,
            default_filters: DEFAULT_CUSTOM_FILTERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.model_or_default(), DEFAULT_GEMINI_MODEL);
        assert_eq!(config.llm.temperature, DEFAULT_TEMPERATURE);
        assert!(config.llm.search_enabled);
        assert_eq!(config.storage.favorites_file, DEFAULT_FAVORITES_FILE);
        assert_eq!(config.search.default_profile, RiskLevel::Moderate);
    }

    #[test]
    fn test_api_key_never_serialized() {
        let mut config = Config::default();
        config.llm.api_key = Some("secret".to_string());
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(!toml_str.contains("secret"));
        assert!(toml_str.contains("[llm]"));
        assert!(toml_str.contains("[storage]"));
        assert!(toml_str.contains("[search]"));
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = LLMConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_validate_rejects_temperature() {
        let mut config = Config::default();
        config.llm.temperature = 3.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
