use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vocab_core::model::{
    DEFAULT_LIST_NAME, EntryDraft, ItemStat, ListId, StatKey, VocabList, VocabularyEntry,
};

/// Persisted shape of a vocabulary entry.
///
/// Every field is optional on read so older or hand-edited stores still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryRecord {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

impl EntryRecord {
    #[must_use]
    pub fn from_entry(entry: &VocabularyEntry) -> Self {
        Self {
            word: entry.word().to_owned(),
            definition: entry.definition().to_owned(),
            example: entry.example().unwrap_or_default().to_owned(),
            synonyms: entry.synonyms().to_vec(),
            antonyms: entry.antonyms().to_vec(),
        }
    }

    /// `None` when the record has no usable word.
    #[must_use]
    pub fn into_entry(self) -> Option<VocabularyEntry> {
        EntryDraft {
            word: self.word,
            definition: self.definition,
            example: Some(self.example),
            synonyms: self.synonyms,
            antonyms: self.antonyms,
        }
        .validate()
        .ok()
    }
}

/// Persisted shape of a list, statistics included.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub words: Vec<EntryRecord>,
    #[serde(default)]
    pub stats: BTreeMap<String, ItemStat>,
}

impl ListRecord {
    #[must_use]
    pub fn from_list(list: &VocabList) -> Self {
        Self {
            id: Some(list.id().to_string()),
            name: Some(list.name().to_owned()),
            words: list.words().iter().map(EntryRecord::from_entry).collect(),
            stats: list
                .stats()
                .iter()
                .map(|(key, stat)| (key.to_storage_key(), *stat))
                .collect(),
        }
    }

    /// Convert the record into a domain list.
    ///
    /// A missing id is replaced with a generated one and a missing name with
    /// the default. Words without text, repeated words, malformed statistics
    /// keys and statistics keyed to another list id are dropped and reported
    /// through `dropped`.
    pub fn into_list(self, dropped: &mut Vec<String>) -> VocabList {
        let id = self
            .id
            .and_then(|raw| ListId::new(raw).ok())
            .unwrap_or_else(ListId::generate);
        let name = self.name.unwrap_or_else(|| DEFAULT_LIST_NAME.to_string());
        let mut list = VocabList::new(id, name);

        for record in self.words {
            let Some(entry) = record.into_entry() else {
                dropped.push(format!("word without text in list {}", list.id()));
                continue;
            };
            if let Err(err) = list.add_word(entry) {
                dropped.push(format!("{err} ({})", list.id()));
            }
        }

        for (raw, stat) in self.stats {
            match raw.parse::<StatKey>() {
                Ok(key) => {
                    if !list.set_stat(key, stat) {
                        dropped.push(format!(
                            "statistic {raw} does not belong to list {}",
                            list.id()
                        ));
                    }
                }
                Err(err) => dropped.push(err.to_string()),
            }
        }

        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocab_core::model::QuestionMode;

    #[test]
    fn record_roundtrip_keeps_words_and_stats() {
        let id = ListId::new("gre").unwrap();
        let mut list = VocabList::new(id.clone(), "GRE");
        list.add_word(
            EntryDraft::new("banal", "trite")
                .with_synonyms(["stale"])
                .validate()
                .unwrap(),
        )
        .unwrap();
        let key = StatKey::new(id, "banal", QuestionMode::SpellingToWord);
        list.set_stat(key.clone(), ItemStat::from_persisted(2, 1));

        let mut dropped = Vec::new();
        let back = ListRecord::from_list(&list).into_list(&mut dropped);

        assert!(dropped.is_empty());
        assert_eq!(back, list);
    }

    #[test]
    fn missing_fields_get_defaults() {
        let record: ListRecord = serde_json::from_str(r#"{"words":[{"word":"eschew"}]}"#).unwrap();
        let mut dropped = Vec::new();
        let list = record.into_list(&mut dropped);

        assert_eq!(list.name(), DEFAULT_LIST_NAME);
        assert_eq!(list.words()[0].definition(), "");
        assert_eq!(list.words()[0].example(), None);
        assert!(!list.id().as_str().is_empty());
    }

    #[test]
    fn malformed_keys_and_blank_words_are_reported() {
        let record: ListRecord = serde_json::from_str(
            r#"{"id":"a","name":"A","words":[{"word":"  "}],
                "stats":{"bogus":{"attempts":1,"correct":1}}}"#,
        )
        .unwrap();
        let mut dropped = Vec::new();
        let list = record.into_list(&mut dropped);

        assert!(list.is_empty());
        assert!(list.stats().is_empty());
        assert_eq!(dropped.len(), 2);
    }

    #[test]
    fn repeated_words_are_reported() {
        let record: ListRecord = serde_json::from_str(
            r#"{"id":"gre","words":[{"word":"eschew"},{"word":"Eschew"},{"word":"banal"}]}"#,
        )
        .unwrap();
        let mut dropped = Vec::new();
        let list = record.into_list(&mut dropped);

        assert_eq!(list.len(), 2);
        assert_eq!(list.words()[0].word(), "eschew");
        assert_eq!(dropped.len(), 1);
        assert!(dropped[0].contains("Eschew"));
    }

    #[test]
    fn stats_of_a_list_without_id_are_reported() {
        let record: ListRecord = serde_json::from_str(
            r#"{"words":[{"word":"eschew"}],
                "stats":{"gre::eschew::spelling_toWord":{"attempts":2,"correct":1}}}"#,
        )
        .unwrap();
        let mut dropped = Vec::new();
        let list = record.into_list(&mut dropped);

        assert!(list.stats().is_empty());
        assert_eq!(dropped.len(), 1);
        assert!(dropped[0].contains("gre::eschew::spelling_toWord"));
    }
}
