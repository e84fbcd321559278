//! Error types for the Accent vocabulary trainer.
//!
//! Uses `thiserror` for structured error definitions that provide
//! clear context about what went wrong.

use thiserror::Error;

/// Error type for vocabulary storage operations.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Failed to read or write the backing file
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode or decode the stored entries
    #[error("Failed to (de)serialize vocabulary store: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Another caller panicked while holding the store
    #[error("Vocabulary store is poisoned")]
    Poisoned,

    /// Failure reported by a backend outside this crate, such as a
    /// database-backed `VocabularyRepository` implementation
    #[error("Repository failure: {0}")]
    Backend(String),
}

/// Error type for configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse config file
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Missing required configuration value
    #[error("Missing required config value: {0}")]
    MissingValue(String),

    /// Invalid configuration value
    #[error("Invalid config value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Config directory not found
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Error type for translation backends.
///
/// These never cross the [`Translator`](crate::translator::Translator) seam;
/// the backend logs them and reports a miss instead.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// HTTP request to API failed
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error: {0}")]
    ApiError(String),

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Translation was refused by the model
    #[error("Translation refused: {0}")]
    Refused(String),

    /// All retry attempts exhausted
    #[error("All retries exhausted after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    /// Invalid API configuration
    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),
}
