use thiserror::Error;

use crate::model::ids::ListId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EntryError {
    #[error("word cannot be empty")]
    EmptyWord,
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated vocabulary entry as supplied by an editor or an import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub word: String,
    pub definition: String,
    pub example: Option<String>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
}

impl EntryDraft {
    #[must_use]
    pub fn new(word: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    #[must_use]
    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_antonyms<I, S>(mut self, antonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.antonyms = antonyms.into_iter().map(Into::into).collect();
        self
    }

    /// Trim and validate the draft.
    ///
    /// Blank synonyms/antonyms are dropped and a blank example becomes `None`.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::EmptyWord` if the word is blank.
    pub fn validate(self) -> Result<VocabularyEntry, EntryError> {
        let word = self.word.trim().to_string();
        if word.is_empty() {
            return Err(EntryError::EmptyWord);
        }

        Ok(VocabularyEntry {
            word,
            definition: self.definition.trim().to_string(),
            example: self
                .example
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
            synonyms: clean_terms(self.synonyms),
            antonyms: clean_terms(self.antonyms),
        })
    }
}

fn clean_terms(terms: Vec<String>) -> Vec<String> {
    terms
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// A validated vocabulary item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    word: String,
    definition: String,
    example: Option<String>,
    synonyms: Vec<String>,
    antonyms: Vec<String>,
}

impl VocabularyEntry {
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    #[must_use]
    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    #[must_use]
    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    #[must_use]
    pub fn antonyms(&self) -> &[String] {
        &self.antonyms
    }

    /// Case-insensitive comparison against another word.
    #[must_use]
    pub fn is_word(&self, other: &str) -> bool {
        self.word.to_lowercase() == other.trim().to_lowercase()
    }

    /// Convert back into an editable draft.
    #[must_use]
    pub fn to_draft(&self) -> EntryDraft {
        EntryDraft {
            word: self.word.clone(),
            definition: self.definition.clone(),
            example: self.example.clone(),
            synonyms: self.synonyms.clone(),
            antonyms: self.antonyms.clone(),
        }
    }
}

//
// ─── POOL ENTRY ────────────────────────────────────────────────────────────────
//

/// An entry tagged with the list it was drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    list_id: ListId,
    entry: VocabularyEntry,
}

impl PoolEntry {
    #[must_use]
    pub fn new(list_id: ListId, entry: VocabularyEntry) -> Self {
        Self { list_id, entry }
    }

    #[must_use]
    pub fn list_id(&self) -> &ListId {
        &self.list_id
    }

    #[must_use]
    pub fn entry(&self) -> &VocabularyEntry {
        &self.entry
    }

    #[must_use]
    pub fn word(&self) -> &str {
        self.entry.word()
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        self.entry.definition()
    }
}
