//! Vocabulary data model.

use serde::{Deserialize, Serialize};

/// A dictionary entry pairing an English headword with its German gloss.
///
/// The headword is the identity of the entry in storage and is never
/// changed after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Lowercase English surface form.
    headword: String,
    /// German translation, empty until translated.
    #[serde(default)]
    pub translation: String,
    /// Set by the user once no further translation is needed.
    #[serde(default)]
    pub known: bool,
}

impl Vocabulary {
    /// Creates a fresh, untranslated entry.
    pub fn new(headword: impl Into<String>) -> Self {
        Self {
            headword: headword.into(),
            translation: String::new(),
            known: false,
        }
    }

    /// Builds an entry that already carries a translation.
    pub fn with_translation(headword: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            headword: headword.into(),
            translation: translation.into(),
            known: false,
        }
    }

    pub fn headword(&self) -> &str {
        &self.headword
    }

    /// True if a non-empty translation is attached.
    pub fn is_translated(&self) -> bool {
        !self.translation.is_empty()
    }

    /// Current lifecycle state of a live entry.
    pub fn state(&self) -> EntryState {
        if self.known {
            EntryState::Known
        } else if self.is_translated() {
            EntryState::Translated
        } else {
            EntryState::Untranslated
        }
    }
}

/// Lifecycle of an entry while it is stored.
///
/// Dropping an entry removes it from storage, so there is no `Deleted`
/// variant on a live value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// No translation yet and not marked known.
    Untranslated,
    /// Carries a German translation.
    Translated,
    /// Marked known by the user; never re-translated.
    Known,
}

/// A transient blob of English prose handed to ingestion.
#[derive(Debug, Clone, Default)]
pub struct Book {
    pub content: String,
}

impl Book {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_untranslated() {
        let entry = Vocabulary::new("house");
        assert_eq!(entry.headword(), "house");
        assert!(entry.translation.is_empty());
        assert!(!entry.known);
        assert_eq!(entry.state(), EntryState::Untranslated);
    }

    #[test]
    fn test_state_transitions() {
        let mut entry = Vocabulary::new("house");
        entry.translation = "Haus".to_string();
        assert_eq!(entry.state(), EntryState::Translated);

        entry.known = true;
        assert_eq!(entry.state(), EntryState::Known);

        // Known wins even without a translation
        let mut bare = Vocabulary::new("tree");
        bare.known = true;
        assert_eq!(bare.state(), EntryState::Known);
    }

    #[test]
    fn test_missing_fields_default_on_load() {
        let entry: Vocabulary = serde_json::from_str(r#"{"headword":"dog"}"#).unwrap();
        assert_eq!(entry, Vocabulary::new("dog"));
    }
}
