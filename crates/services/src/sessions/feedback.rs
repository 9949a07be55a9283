//! Feedback shown after an answer is graded.
//!
//! Lines are plain text with a tone; the rendering layer decides on colors and
//! escaping.

use vocab_core::model::{PoolEntry, QuestionMode, VocabList, VocabularyEntry};

use super::engine::GradedAnswer;

/// How a feedback line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackLine {
    pub text: String,
    pub tone: Tone,
}

impl FeedbackLine {
    fn correct(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Correct,
        }
    }

    fn incorrect(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Incorrect,
        }
    }
}

/// Case-insensitive lookups over every known entry.
///
/// Searches run in list order and the first match wins.
#[derive(Debug, Clone, Default)]
pub struct WordLookup {
    entries: Vec<VocabularyEntry>,
}

impl WordLookup {
    #[must_use]
    pub fn from_lists(lists: &[VocabList]) -> Self {
        Self {
            entries: lists
                .iter()
                .flat_map(|list| list.words().iter().cloned())
                .collect(),
        }
    }

    #[must_use]
    pub fn from_pool(pool: &[PoolEntry]) -> Self {
        Self {
            entries: pool.iter().map(|entry| entry.entry().clone()).collect(),
        }
    }

    fn find(
        &self,
        raw: &str,
        matches: impl Fn(&VocabularyEntry, &str) -> bool,
    ) -> Option<&VocabularyEntry> {
        let needle = raw.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.entries.iter().find(|entry| matches(entry, &needle))
    }

    #[must_use]
    pub fn entry(&self, word: &str) -> Option<&VocabularyEntry> {
        self.find(word, |entry, needle| entry.word().to_lowercase() == needle)
    }

    /// Definition of `word`, or an empty string when unknown.
    #[must_use]
    pub fn definition_of(&self, word: &str) -> &str {
        self.entry(word).map_or("", VocabularyEntry::definition)
    }

    #[must_use]
    pub fn word_with_definition(&self, definition: &str) -> Option<&VocabularyEntry> {
        self.find(definition, |entry, needle| {
            entry.definition().to_lowercase() == needle
        })
    }

    #[must_use]
    pub fn word_with_synonym(&self, synonym: &str) -> Option<&VocabularyEntry> {
        self.find(synonym, |entry, needle| {
            entry.synonyms().iter().any(|s| s.to_lowercase() == needle)
        })
    }

    #[must_use]
    pub fn word_with_antonym(&self, antonym: &str) -> Option<&VocabularyEntry> {
        self.find(antonym, |entry, needle| {
            entry.antonyms().iter().any(|a| a.to_lowercase() == needle)
        })
    }
}

/// Build the feedback lines for a graded answer.
#[must_use]
pub fn feedback_lines(graded: &GradedAnswer, lookup: &WordLookup) -> Vec<FeedbackLine> {
    if graded.correct {
        return vec![FeedbackLine::correct("Correct!")];
    }

    let your = graded.your.as_str();
    let expected = graded.expected.as_str();
    let answered = !your.is_empty() && your != expected;
    let mut lines = Vec::new();

    match graded.mode {
        QuestionMode::SpellingToWord => {
            lines.push(FeedbackLine::incorrect(format!("Correct Word: {expected}")));
        }
        QuestionMode::SpellingToAnswer => {
            lines.push(FeedbackLine::incorrect(format!("Correct Definition: {expected}")));
        }
        QuestionMode::DefinitionToWord => {
            if answered {
                let your_def = lookup.definition_of(your);
                lines.push(FeedbackLine::incorrect(format!("{your}: {your_def}")));
            }
            lines.push(FeedbackLine::correct(format!("{expected}: {}", graded.definition)));
        }
        QuestionMode::DefinitionToAnswer => {
            if answered {
                let owner = lookup.word_with_definition(your).map_or("", VocabularyEntry::word);
                lines.push(FeedbackLine::incorrect(format!("You selected: {owner} ({your})")));
            }
        }
        QuestionMode::SynonymToAnswer | QuestionMode::AntonymToAnswer => {
            if answered {
                let owner = if graded.mode == QuestionMode::SynonymToAnswer {
                    lookup.word_with_synonym(your)
                } else {
                    lookup.word_with_antonym(your)
                };
                let word = owner.map_or("", VocabularyEntry::word);
                let definition = owner.map_or("", VocabularyEntry::definition);
                lines.push(FeedbackLine::incorrect(format!(
                    "You selected: {word} ({definition})"
                )));
            }
            lines.push(FeedbackLine::correct(format!(
                "{}: {}",
                graded.word, graded.definition
            )));
        }
        QuestionMode::SynonymToWord => {
            if answered {
                lines.push(FeedbackLine::incorrect(format!("You chose: {your}")));
            }
            lines.push(FeedbackLine::correct(format!("{expected}: {}", graded.definition)));
        }
        QuestionMode::AntonymToWord => {
            if answered {
                let your_def = lookup.definition_of(your);
                lines.push(FeedbackLine::incorrect(format!("You chose: {your} ({your_def})")));
            }
            lines.push(FeedbackLine::correct(format!("{expected}: {}", graded.definition)));
        }
    }

    if lines.is_empty() {
        lines.push(FeedbackLine::incorrect("Incorrect."));
    }
    lines
}
