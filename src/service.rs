//! Vocabulary orchestration: ingestion, study draws, updates and drops.
//!
//! The service holds no state of its own between calls. Repository failures
//! are returned to the caller untouched; translation misses and ignore-file
//! write failures are absorbed according to each operation's policy.

use crate::config::Config;
use crate::error::RepositoryError;
use crate::extractor::extract_words;
use crate::ignore_log::IgnoreLog;
use crate::model::{Book, Vocabulary};
use crate::random::{RandomSource, ThreadRandom};
use crate::repository::VocabularyRepository;
use crate::translator::Translator;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Orchestrates the dictionary on top of its collaborators.
pub struct VocabularyService {
    repository: Arc<dyn VocabularyRepository>,
    translator: Arc<dyn Translator>,
    random: Box<dyn RandomSource>,
    ignore_log: IgnoreLog,
    /// Drop ignored headwords from ingestion candidates.
    filter_on_ingest: bool,
    /// Translation misses tolerated by `random_translated`.
    max_draw_attempts: Option<u32>,
}

impl VocabularyService {
    /// Creates a service with a thread RNG, no ingest filter and unbounded
    /// translated draws.
    pub fn new(
        repository: Arc<dyn VocabularyRepository>,
        translator: Arc<dyn Translator>,
        ignore_log: IgnoreLog,
    ) -> Self {
        Self {
            repository,
            translator,
            random: Box::new(ThreadRandom),
            ignore_log,
            filter_on_ingest: false,
            max_draw_attempts: None,
        }
    }

    /// Creates a service wired from configuration.
    pub fn from_config(
        config: &Config,
        repository: Arc<dyn VocabularyRepository>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self::new(
            repository,
            translator,
            IgnoreLog::new(&config.ignore.file_path),
        )
        .with_ingest_filter(config.ignore.filter_on_ingest)
        .with_draw_limit(config.draw_limit())
    }

    pub fn with_random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Box::new(random);
        self
    }

    pub fn with_ingest_filter(mut self, enabled: bool) -> Self {
        self.filter_on_ingest = enabled;
        self
    }

    /// Caps translation misses in [`random_translated`](Self::random_translated).
    /// `None` retries until a translation succeeds or the dictionary is empty.
    pub fn with_draw_limit(mut self, limit: Option<u32>) -> Self {
        self.max_draw_attempts = limit;
        self
    }

    pub fn ignore_log(&self) -> &IgnoreLog {
        &self.ignore_log
    }

    /// Adds every word of `book` that is not yet in the dictionary.
    ///
    /// New entries start untranslated and unknown and are written in one
    /// batch. Returns how many entries were added.
    pub async fn add_new_words(&self, book: &Book) -> Result<usize, RepositoryError> {
        let mut candidates = extract_words(&book.content);
        debug!("extracted {} candidate words", candidates.len());

        if self.filter_on_ingest {
            match self.ignore_log.load() {
                Ok(ignored) => candidates.retain(|word| !ignored.contains(word)),
                Err(e) => warn!(
                    "could not read ignore file {}: {}",
                    self.ignore_log.filepath().display(),
                    e
                ),
            }
        }

        for existing in self.repository.find_all().await? {
            candidates.remove(existing.headword());
        }

        let new_entries: Vec<Vocabulary> = candidates.into_iter().map(Vocabulary::new).collect();
        let added = new_entries.len();
        info!("adding {} new words to the dictionary", added);
        self.repository.save_all(new_entries).await?;

        Ok(added)
    }

    /// Draws one entry uniformly at random, or `None` for an empty dictionary.
    pub async fn random_vocabulary(&self) -> Result<Option<Vocabulary>, RepositoryError> {
        let mut entries = self.repository.find_all().await?;
        if entries.is_empty() {
            return Ok(None);
        }

        let index = self.random.next_index(entries.len());
        Ok(Some(entries.swap_remove(index)))
    }

    /// Draws a random entry that carries a translation.
    ///
    /// Untranslated draws are translated on the spot; a miss triggers a fresh
    /// draw. The result is not persisted.
    pub async fn random_translated(&self) -> Result<Option<Vocabulary>, RepositoryError> {
        let mut misses = 0u32;

        loop {
            let Some(entry) = self.random_vocabulary().await? else {
                return Ok(None);
            };

            if entry.is_translated() {
                return Ok(Some(entry));
            }

            if let Some(translated) = self.translator.translate(&entry).await {
                return Ok(Some(translated));
            }

            misses += 1;
            debug!("no translation for '{}', drawing again", entry.headword());
            if self.max_draw_attempts.is_some_and(|limit| misses >= limit) {
                warn!("gave up drawing a translated word after {} misses", misses);
                return Ok(None);
            }
        }
    }

    /// Stores `entry`, translating it first unless it is marked known.
    ///
    /// A translation miss still saves the entry as given.
    pub async fn update_vocabulary(&self, entry: Vocabulary) -> Result<Vocabulary, RepositoryError> {
        let entry = if entry.known {
            entry
        } else {
            match self.translator.translate(&entry).await {
                Some(translated) => translated,
                None => entry,
            }
        };

        self.repository.save(entry).await
    }

    /// Records the headword in the ignore file and removes the entry.
    ///
    /// The two steps are not atomic. A failed append is logged and the
    /// delete still happens.
    pub async fn drop_and_ignore(&self, entry: &Vocabulary) -> Result<(), RepositoryError> {
        info!("vocabulary {} will be added to ignore list", entry.headword());
        if let Err(e) = self.ignore_log.append(entry.headword()) {
            error!(
                "error occurred while updating ignore file {}: {}",
                self.ignore_log.filepath().display(),
                e
            );
        }

        self.repository.delete(entry).await
    }

    /// Returns every entry in repository order.
    pub async fn all_vocabularies(&self) -> Result<Vec<Vocabulary>, RepositoryError> {
        self.repository.find_all().await
    }
}
