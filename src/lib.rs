//! Accent - personal English to German vocabulary trainer.
//!
//! This library provides functionality for:
//! - Extracting candidate words from book text
//! - Maintaining a persistent dictionary of headwords and translations
//! - Drawing random study words, translating them on demand
//! - Dropping words into an append-only ignore list

pub mod config;
pub mod console;
pub mod error;
pub mod extractor;
pub mod ignore_log;
pub mod model;
pub mod random;
pub mod repository;
pub mod service;
pub mod translator;

// Re-export commonly used types
pub use config::Config;
pub use console::Console;
pub use error::{ConfigError, RepositoryError, TranslationError};
pub use extractor::extract_words;
pub use ignore_log::IgnoreLog;
pub use model::{Book, EntryState, Vocabulary};
pub use random::{RandomSource, ThreadRandom};
pub use repository::{JsonRepository, MemoryRepository, VocabularyRepository};
pub use service::VocabularyService;
pub use translator::{ChatTranslator, Translator};
