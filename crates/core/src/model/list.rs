use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::entry::{PoolEntry, VocabularyEntry};
use crate::model::ids::ListId;
use crate::model::stats::{ItemStat, StatKey};

pub const DEFAULT_LIST_NAME: &str = "Untitled";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ListError {
    #[error("word already exists in list: {0}")]
    DuplicateWord(String),
}

/// A named vocabulary list together with the statistics gathered for its words.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabList {
    id: ListId,
    name: String,
    words: Vec<VocabularyEntry>,
    stats: BTreeMap<StatKey, ItemStat>,
}

impl VocabList {
    /// Creates an empty list. A blank name becomes [`DEFAULT_LIST_NAME`].
    #[must_use]
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        let name = name.into().trim().to_string();
        Self {
            id,
            name: if name.is_empty() {
                DEFAULT_LIST_NAME.to_string()
            } else {
                name
            },
            words: Vec::new(),
            stats: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &ListId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn words(&self) -> &[VocabularyEntry] {
        &self.words
    }

    #[must_use]
    pub fn stats(&self) -> &BTreeMap<StatKey, ItemStat> {
        &self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Append a word.
    ///
    /// # Errors
    ///
    /// Returns `ListError::DuplicateWord` if the list already holds the word,
    /// compared case-insensitively.
    pub fn add_word(&mut self, entry: VocabularyEntry) -> Result<(), ListError> {
        if self.find_word(entry.word()).is_some() {
            return Err(ListError::DuplicateWord(entry.word().to_string()));
        }
        self.words.push(entry);
        Ok(())
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn find_word(&self, word: &str) -> Option<&VocabularyEntry> {
        self.words.iter().find(|entry| entry.is_word(word))
    }

    #[must_use]
    pub fn stat(&self, key: &StatKey) -> Option<&ItemStat> {
        self.stats.get(key)
    }

    /// Store `stat` under `key`. Returns false if the key belongs to another list.
    pub fn set_stat(&mut self, key: StatKey, stat: ItemStat) -> bool {
        if key.list_id() != &self.id {
            return false;
        }
        self.stats.insert(key, stat);
        true
    }

    /// Entries of this list tagged with its id.
    pub fn pool_entries(&self) -> impl Iterator<Item = PoolEntry> + '_ {
        self.words
            .iter()
            .map(|entry| PoolEntry::new(self.id.clone(), entry.clone()))
    }
}
