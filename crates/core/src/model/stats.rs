use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::config::QuestionMode;
use crate::model::ids::ListId;

const KEY_SEPARATOR: &str = "::";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StatKeyError {
    #[error("malformed statistics key: {0}")]
    Malformed(String),
}

//
// ─── KEY ───────────────────────────────────────────────────────────────────────
//

/// Identifies the statistics of one word, in one list, under one question mode.
///
/// The word is stored lower-cased so keys are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatKey {
    list_id: ListId,
    word: String,
    mode: QuestionMode,
}

impl StatKey {
    #[must_use]
    pub fn new(list_id: ListId, word: &str, mode: QuestionMode) -> Self {
        Self {
            list_id,
            word: word.trim().to_lowercase(),
            mode,
        }
    }

    #[must_use]
    pub fn list_id(&self) -> &ListId {
        &self.list_id
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn mode(&self) -> QuestionMode {
        self.mode
    }

    /// Storage form: `list::word::mode`.
    #[must_use]
    pub fn to_storage_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{}",
            self.list_id, self.word, self.mode
        )
    }
}

impl FromStr for StatKey {
    type Err = StatKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || StatKeyError::Malformed(s.to_string());
        let mut parts = s.rsplitn(3, KEY_SEPARATOR);
        let mode = parts.next().ok_or_else(malformed)?;
        let word = parts.next().ok_or_else(malformed)?;
        let list = parts.next().ok_or_else(malformed)?;

        let mode: QuestionMode = mode.parse().map_err(|_| malformed())?;
        let list_id = ListId::new(list).map_err(|_| malformed())?;
        if word.is_empty() {
            return Err(malformed());
        }
        Ok(Self::new(list_id, word, mode))
    }
}

//
// ─── ITEM STAT ─────────────────────────────────────────────────────────────────
//

/// Attempt/correct counters for one [`StatKey`].
///
/// Accuracy is always derived from the counters. Stored data may carry an
/// `accuracy` field; it is ignored on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawItemStat")]
pub struct ItemStat {
    attempts: u32,
    correct: u32,
}

#[derive(Deserialize)]
struct RawItemStat {
    #[serde(default)]
    attempts: u32,
    #[serde(default)]
    correct: u32,
}

impl From<RawItemStat> for ItemStat {
    fn from(raw: RawItemStat) -> Self {
        Self::from_persisted(raw.attempts, raw.correct)
    }
}

impl ItemStat {
    /// Rehydrate counters from storage, clamping `correct` to `attempts`.
    #[must_use]
    pub fn from_persisted(attempts: u32, correct: u32) -> Self {
        Self {
            attempts,
            correct: correct.min(attempts),
        }
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// `correct / attempts`, or 0 when there are no attempts.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        ratio(self.correct, self.attempts)
    }

    /// Count one graded answer.
    pub fn record(&mut self, correct: bool) {
        self.attempts = self.attempts.saturating_add(1);
        if correct {
            self.correct = self.correct.saturating_add(1);
        }
    }
}

/// Read-only view of all persisted statistics.
pub type StatsSnapshot = HashMap<StatKey, ItemStat>;

pub(crate) fn ratio(correct: u32, attempts: u32) -> f64 {
    if attempts == 0 {
        0.0
    } else {
        f64::from(correct) / f64::from(attempts)
    }
}
