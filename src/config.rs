//! Configuration management for Accent.
//!
//! Handles loading, saving, and validating configuration from
//! platform-specific config directories.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application name used for config directory.
const APP_NAME: &str = "Accent";

/// Default config filename.
const CONFIG_FILENAME: &str = "config.toml";

/// Upper bound for `translation.retries`; backoff doubles per attempt.
const MAX_RETRIES: u32 = 10;

/// Placeholder value for unconfigured API keys.
const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ignore list settings.
    pub ignore: IgnoreConfig,

    /// Vocabulary storage settings.
    pub storage: StorageConfig,

    /// Translation API configuration.
    pub api: ApiConfig,

    /// Translation behavior settings.
    pub translation: TranslationConfig,
}

/// Ignore list configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// File receiving dropped headwords. Relative paths resolve against
    /// the working directory.
    pub file_path: PathBuf,

    /// Skip ignored headwords when ingesting a book.
    pub filter_on_ingest: bool,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from("var/ignore.txt"),
            filter_on_ingest: false,
        }
    }
}

/// Vocabulary storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding the dictionary.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("var/vocabulary.json"),
        }
    }
}

/// API configuration for the translation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API key (required for translation).
    pub key: String,

    /// Base URL for the API.
    pub base_url: String,

    /// Model identifier.
    pub model: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: API_KEY_PLACEHOLDER.to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}

impl ApiConfig {
    /// Checks if the API key is configured (not placeholder).
    pub fn is_configured(&self) -> bool {
        !self.key.is_empty() && self.key != API_KEY_PLACEHOLDER
    }
}

/// Translation behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Number of attempts per word against the API.
    pub retries: u32,

    /// Delay after each API request in seconds.
    pub delay_between_requests_sec: f64,

    /// Translation misses tolerated while drawing a translated entry.
    /// Zero retries until success or an empty dictionary.
    pub max_draw_attempts: u32,

    /// System prompt for single-word translation.
    pub prompt: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            delay_between_requests_sec: 0.0,
            max_draw_attempts: 50,
            prompt: "You are an English to German dictionary. Translate the given English word to German. Reply with the German word only, nothing else. Include the article for nouns.".to_string(),
        }
    }
}

impl TranslationConfig {
    /// Retry cap for drawing a translated entry, if any.
    pub fn draw_limit(&self) -> Option<u32> {
        (self.max_draw_attempts > 0).then_some(self.max_draw_attempts)
    }
}

impl Config {
    /// Retry cap for drawing a translated entry.
    ///
    /// Without an API key every translation misses, so one draw is enough.
    pub fn draw_limit(&self) -> Option<u32> {
        if self.api.is_configured() {
            self.translation.draw_limit()
        } else {
            Some(1)
        }
    }

    /// Returns the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Returns the full path to the config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    /// Loads configuration from the default location.
    ///
    /// If the config file doesn't exist, creates a default one.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// The API key is only checked when `require_api` is set, since most
    /// commands never touch the translator.
    pub fn validate(&self, require_api: bool) -> Result<(), ConfigError> {
        if self.ignore.file_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingValue("ignore.file_path".to_string()));
        }

        if self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingValue("storage.path".to_string()));
        }

        if let Err(e) = url::Url::parse(&self.api.base_url) {
            return Err(ConfigError::InvalidValue {
                key: "api.base_url".to_string(),
                message: e.to_string(),
            });
        }

        if self.translation.retries == 0 || self.translation.retries > MAX_RETRIES {
            return Err(ConfigError::InvalidValue {
                key: "translation.retries".to_string(),
                message: format!("must be between 1 and {}", MAX_RETRIES),
            });
        }

        let delay = self.translation.delay_between_requests_sec;
        if !delay.is_finite() || delay < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "translation.delay_between_requests_sec".to_string(),
                message: "must be a finite, non-negative number of seconds".to_string(),
            });
        }

        if require_api && !self.api.is_configured() {
            return Err(ConfigError::MissingValue(
                "api.key (set your API key in config file)".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ignore.file_path, PathBuf::from("var/ignore.txt"));
        assert!(!config.ignore.filter_on_ingest);
        assert!(!config.api.is_configured());
        assert_eq!(config.translation.draw_limit(), Some(50));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[ignore]\nfile_path = \"/tmp/words.txt\"\n").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.ignore.file_path, PathBuf::from("/tmp/words.txt"));
        assert_eq!(config.storage.path, PathBuf::from("var/vocabulary.json"));
        assert_eq!(config.translation.retries, 3);
    }

    #[test]
    fn test_missing_file_written_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Accent").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.api.model, "gpt-4o-mini");
    }

    #[test]
    fn test_invalid_toml() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "ignore = [").unwrap();
        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate(false).is_ok());
        assert!(config.validate(true).is_err()); // API key not set

        let mut config = Config::default();
        config.api.key = "real-key".to_string();
        assert!(config.validate(true).is_ok());

        config.api.base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(false),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_retry_and_delay_bounds() {
        let mut config = Config::default();
        config.translation.retries = 65;
        assert!(matches!(
            config.validate(false),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "translation.retries"
        ));

        config.translation.retries = MAX_RETRIES;
        assert!(config.validate(false).is_ok());

        for delay in [f64::INFINITY, f64::NAN, -1.0] {
            config.translation.delay_between_requests_sec = delay;
            assert!(matches!(
                config.validate(false),
                Err(ConfigError::InvalidValue { ref key, .. })
                    if key == "translation.delay_between_requests_sec"
            ));
        }
    }

    #[test]
    fn test_single_draw_without_api_key() {
        let mut config = Config::default();
        assert_eq!(config.draw_limit(), Some(1));

        config.api.key = "real-key".to_string();
        assert_eq!(config.draw_limit(), Some(50));

        config.translation.max_draw_attempts = 0;
        assert_eq!(config.draw_limit(), None);
    }

    #[test]
    fn test_unbounded_draws() {
        let mut translation = TranslationConfig::default();
        translation.max_draw_attempts = 0;
        assert_eq!(translation.draw_limit(), None);
    }
}
