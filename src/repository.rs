//! Vocabulary storage.
//!
//! The [`VocabularyRepository`] trait is the seam the service talks to.
//! Two backends are provided: a JSON file store for real use and an
//! in-memory map for tests and dry runs. Both key entries by headword,
//! so saving an entry with an existing headword replaces it.

use crate::error::RepositoryError;
use crate::model::Vocabulary;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Durable mapping from headword to entry.
#[async_trait]
pub trait VocabularyRepository: Send + Sync {
    /// Returns every stored entry.
    async fn find_all(&self) -> Result<Vec<Vocabulary>, RepositoryError>;

    /// Inserts or replaces one entry and returns what was stored.
    async fn save(&self, entry: Vocabulary) -> Result<Vocabulary, RepositoryError>;

    /// Inserts or replaces a batch of entries in one write.
    async fn save_all(&self, entries: Vec<Vocabulary>) -> Result<(), RepositoryError>;

    /// Removes the entry with the same headword. Absent entries are ignored.
    async fn delete(&self, entry: &Vocabulary) -> Result<(), RepositoryError>;
}

type EntryMap = BTreeMap<String, Vocabulary>;

fn lock(map: &Mutex<EntryMap>) -> Result<MutexGuard<'_, EntryMap>, RepositoryError> {
    map.lock().map_err(|_| RepositoryError::Poisoned)
}

/// Volatile repository backed by an ordered map.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    entries: Mutex<EntryMap>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `entries`.
    pub fn with_entries(entries: impl IntoIterator<Item = Vocabulary>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| (e.headword().to_string(), e))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl VocabularyRepository for MemoryRepository {
    async fn find_all(&self) -> Result<Vec<Vocabulary>, RepositoryError> {
        Ok(lock(&self.entries)?.values().cloned().collect())
    }

    async fn save(&self, entry: Vocabulary) -> Result<Vocabulary, RepositoryError> {
        lock(&self.entries)?.insert(entry.headword().to_string(), entry.clone());
        Ok(entry)
    }

    async fn save_all(&self, entries: Vec<Vocabulary>) -> Result<(), RepositoryError> {
        let mut map = lock(&self.entries)?;
        for entry in entries {
            map.insert(entry.headword().to_string(), entry);
        }
        Ok(())
    }

    async fn delete(&self, entry: &Vocabulary) -> Result<(), RepositoryError> {
        lock(&self.entries)?.remove(entry.headword());
        Ok(())
    }
}

/// On-disk layout of the JSON store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct VocabularyFile {
    entries: Vec<Vocabulary>,
}

/// Repository persisted as a pretty-printed JSON document.
///
/// The whole file is rewritten after every mutation. The in-memory copy is
/// only updated once the write succeeded.
#[derive(Debug)]
pub struct JsonRepository {
    /// Path to the JSON file.
    filepath: PathBuf,
    /// Entries keyed by headword.
    entries: Mutex<EntryMap>,
}

impl JsonRepository {
    /// Opens the store at `path`, loading it if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let filepath = path.into();
        let entries = if filepath.exists() {
            Self::read_from_disk(&filepath)?
        } else {
            EntryMap::new()
        };

        Ok(Self {
            filepath,
            entries: Mutex::new(entries),
        })
    }

    /// Get the filepath for this store.
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    fn read_from_disk(path: &Path) -> Result<EntryMap, RepositoryError> {
        let content = std::fs::read_to_string(path)?;
        let file: VocabularyFile = serde_json::from_str(&content)?;
        Ok(file
            .entries
            .into_iter()
            .map(|e| (e.headword().to_string(), e))
            .collect())
    }

    fn write_to_disk(&self, entries: &EntryMap) -> Result<(), RepositoryError> {
        // Ensure parent directory exists
        if let Some(parent) = self.filepath.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = VocabularyFile {
            entries: entries.values().cloned().collect(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.filepath, content)?;
        Ok(())
    }

    /// Applies `change` to a copy of the entries, persists it, then commits.
    fn mutate(&self, change: impl FnOnce(&mut EntryMap)) -> Result<(), RepositoryError> {
        let mut current = lock(&self.entries)?;
        let mut next = current.clone();
        change(&mut next);
        self.write_to_disk(&next)?;
        *current = next;
        Ok(())
    }
}

#[async_trait]
impl VocabularyRepository for JsonRepository {
    async fn find_all(&self) -> Result<Vec<Vocabulary>, RepositoryError> {
        Ok(lock(&self.entries)?.values().cloned().collect())
    }

    async fn save(&self, entry: Vocabulary) -> Result<Vocabulary, RepositoryError> {
        let stored = entry.clone();
        self.mutate(|map| {
            map.insert(entry.headword().to_string(), entry);
        })?;
        Ok(stored)
    }

    async fn save_all(&self, entries: Vec<Vocabulary>) -> Result<(), RepositoryError> {
        if entries.is_empty() {
            return Ok(());
        }
        self.mutate(|map| {
            for entry in entries {
                map.insert(entry.headword().to_string(), entry);
            }
        })
    }

    async fn delete(&self, entry: &Vocabulary) -> Result<(), RepositoryError> {
        self.mutate(|map| {
            map.remove(entry.headword());
        })
    }
}
