//! English to German word translation.
//!
//! The [`Translator`] trait is best-effort: a miss is `None`, never an error.
//! [`ChatTranslator`] implements it on top of an OpenAI-compatible chat
//! completions API with retry and refusal detection.

use crate::config::{ApiConfig, TranslationConfig};
use crate::error::TranslationError;
use crate::model::Vocabulary;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};

/// Refusal phrases that indicate the model declined to translate.
static REFUSAL_PHRASES: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    vec![
        "i'm sorry",
        "i cannot",
        "i am unable",
        "as an ai",
        "my apologies",
        "i am not programmed",
        "i do not have the ability",
    ]
});

/// Best-effort translation of a single entry.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Returns a copy of `entry` with `translation` populated, or `None`
    /// when no translation could be produced.
    async fn translate(&self, entry: &Vocabulary) -> Option<Vocabulary>;
}

/// A message in the chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

/// Request body for the chat completions API.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

/// Response from the chat completions API.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Translator backed by an OpenAI-compatible chat completions endpoint.
pub struct ChatTranslator {
    /// HTTP client for API requests.
    client: Client,
    /// API configuration.
    api_config: ApiConfig,
    /// Retry, delay and prompt settings.
    translation_config: TranslationConfig,
}

impl ChatTranslator {
    pub fn new(api_config: ApiConfig, translation_config: TranslationConfig) -> Self {
        Self {
            client: Client::new(),
            api_config,
            translation_config,
        }
    }

    /// Translates one English word, retrying with exponential backoff.
    pub async fn translate_word(&self, word: &str) -> Result<String, TranslationError> {
        if !self.api_config.is_configured() {
            return Err(TranslationError::InvalidConfig(
                "API key not configured".to_string(),
            ));
        }

        let attempts = self.translation_config.retries.max(1);
        let mut attempt = 0;

        loop {
            match self.request_translation(word).await {
                Ok(translated) => return Ok(translated),
                Err(e) => {
                    attempt += 1;
                    if attempt >= attempts {
                        debug!("last attempt for '{}' failed: {}", word, e);
                        return Err(TranslationError::RetriesExhausted { attempts });
                    }
                    let delay = Duration::from_secs(2u64.saturating_pow(attempt));
                    warn!(
                        "translation of '{}' failed, retrying in {:?} (attempt {}/{}): {}",
                        word,
                        delay,
                        attempt + 1,
                        attempts,
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Sends a single request and validates the answer.
    async fn request_translation(&self, word: &str) -> Result<String, TranslationError> {
        let request = ChatRequest {
            model: self.api_config.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: self.translation_config.prompt.clone(),
                },
                Message {
                    role: "user".to_string(),
                    content: word.to_string(),
                },
            ],
        };

        let url = format!(
            "{}/chat/completions",
            self.api_config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_config.key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(TranslationError::ApiError(format!("HTTP {}: {}", status, text)));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::ParseError(e.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        // Negative or non-finite delays are rejected by config validation
        if let Ok(delay) =
            Duration::try_from_secs_f64(self.translation_config.delay_between_requests_sec)
        {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        clean_translation(&content)
    }
}

#[async_trait]
impl Translator for ChatTranslator {
    async fn translate(&self, entry: &Vocabulary) -> Option<Vocabulary> {
        if entry.headword().is_empty() {
            return None;
        }

        match self.translate_word(entry.headword()).await {
            Ok(translation) => {
                debug!("translated '{}' -> '{}'", entry.headword(), translation);
                let mut translated = entry.clone();
                translated.translation = translation;
                Some(translated)
            }
            Err(e) => {
                warn!("no translation for '{}': {}", entry.headword(), e);
                None
            }
        }
    }
}

/// Reduces a model reply to a bare gloss.
///
/// Keeps the first non-empty line, strips surrounding quotes and a trailing
/// period, and rejects empty or refusing replies.
fn clean_translation(reply: &str) -> Result<String, TranslationError> {
    let line = reply
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();

    let lower = line.to_lowercase();
    if let Some(phrase) = REFUSAL_PHRASES.iter().find(|p| lower.starts_with(*p)) {
        return Err(TranslationError::Refused(format!(
            "Response starts with refusal phrase: {}",
            phrase
        )));
    }

    let cleaned = line
        .trim_end_matches('.')
        .trim_matches(|c| matches!(c, '"' | '\'' | '„' | '“' | '”' | '`'))
        .trim_end_matches('.')
        .trim();

    if cleaned.is_empty() {
        return Err(TranslationError::Refused("Empty response".to_string()));
    }

    Ok(cleaned.to_string())
}
