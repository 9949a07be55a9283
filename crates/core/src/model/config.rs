use std::fmt;
use std::str::FromStr;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("unknown {kind}: {raw}")]
    Unknown { kind: &'static str, raw: String },
}

fn unknown(kind: &'static str, raw: &str) -> ConfigError {
    ConfigError::Unknown {
        kind,
        raw: raw.to_string(),
    }
}

//
// ─── OPTIONS ───────────────────────────────────────────────────────────────────
//

/// Which facet of an entry is quizzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentKind {
    #[default]
    Spelling,
    Definition,
    Synonym,
    Antonym,
}

impl ContentKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Spelling => "spelling",
            ContentKind::Definition => "definition",
            ContentKind::Synonym => "synonym",
            ContentKind::Antonym => "antonym",
        }
    }
}

/// Whether the word is the prompt (`ToAnswer`) or the expected answer (`ToWord`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    ToWord,
    ToAnswer,
}

impl Direction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::ToWord => "toWord",
            Direction::ToAnswer => "toAnswer",
        }
    }
}

/// How questions are drawn over the life of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionMode {
    /// Endless random drill.
    #[default]
    Normal,
    /// Endless drill weighted towards low-accuracy entries.
    Learning,
    /// Every entry exactly once.
    Test,
}

impl SessionMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SessionMode::Normal => "normal",
            SessionMode::Learning => "learning",
            SessionMode::Test => "test",
        }
    }

    /// Normal and learning sessions never run out of questions.
    #[must_use]
    pub fn is_infinite(self) -> bool {
        !matches!(self, SessionMode::Test)
    }
}

/// How synonyms/antonyms are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SynAntPrompt {
    /// One randomly chosen synonym/antonym.
    #[default]
    Random,
    /// All synonyms/antonyms joined into one string.
    All,
}

impl SynAntPrompt {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SynAntPrompt::Random => "random",
            SynAntPrompt::All => "all",
        }
    }
}

/// What to do with entries that have no synonyms/antonyms in a relation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MissingRelationPolicy {
    /// Quiz the entry anyway, using its own word as the relation.
    #[default]
    FallbackToWord,
    /// Leave the entry out of the queue.
    SkipEntry,
}

impl FromStr for ContentKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "spelling" => Ok(Self::Spelling),
            "definition" => Ok(Self::Definition),
            "synonym" => Ok(Self::Synonym),
            "antonym" => Ok(Self::Antonym),
            other => Err(unknown("content type", other)),
        }
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "toWord" => Ok(Self::ToWord),
            "toAnswer" => Ok(Self::ToAnswer),
            other => Err(unknown("direction", other)),
        }
    }
}

impl FromStr for SessionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "normal" => Ok(Self::Normal),
            "learning" => Ok(Self::Learning),
            "test" => Ok(Self::Test),
            other => Err(unknown("session mode", other)),
        }
    }
}

impl FromStr for SynAntPrompt {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "random" => Ok(Self::Random),
            "all" => Ok(Self::All),
            other => Err(unknown("synonym/antonym prompt", other)),
        }
    }
}

//
// ─── QUESTION MODE ─────────────────────────────────────────────────────────────
//

/// Content × direction: the fixed quiz shape of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuestionMode {
    SpellingToWord,
    SpellingToAnswer,
    DefinitionToWord,
    DefinitionToAnswer,
    SynonymToWord,
    SynonymToAnswer,
    AntonymToWord,
    AntonymToAnswer,
}

impl QuestionMode {
    pub const ALL: [QuestionMode; 8] = [
        QuestionMode::SpellingToWord,
        QuestionMode::SpellingToAnswer,
        QuestionMode::DefinitionToWord,
        QuestionMode::DefinitionToAnswer,
        QuestionMode::SynonymToWord,
        QuestionMode::SynonymToAnswer,
        QuestionMode::AntonymToWord,
        QuestionMode::AntonymToAnswer,
    ];

    #[must_use]
    pub fn new(content: ContentKind, direction: Direction) -> Self {
        match (content, direction) {
            (ContentKind::Spelling, Direction::ToWord) => Self::SpellingToWord,
            (ContentKind::Spelling, Direction::ToAnswer) => Self::SpellingToAnswer,
            (ContentKind::Definition, Direction::ToWord) => Self::DefinitionToWord,
            (ContentKind::Definition, Direction::ToAnswer) => Self::DefinitionToAnswer,
            (ContentKind::Synonym, Direction::ToWord) => Self::SynonymToWord,
            (ContentKind::Synonym, Direction::ToAnswer) => Self::SynonymToAnswer,
            (ContentKind::Antonym, Direction::ToWord) => Self::AntonymToWord,
            (ContentKind::Antonym, Direction::ToAnswer) => Self::AntonymToAnswer,
        }
    }

    #[must_use]
    pub fn content(self) -> ContentKind {
        match self {
            Self::SpellingToWord | Self::SpellingToAnswer => ContentKind::Spelling,
            Self::DefinitionToWord | Self::DefinitionToAnswer => ContentKind::Definition,
            Self::SynonymToWord | Self::SynonymToAnswer => ContentKind::Synonym,
            Self::AntonymToWord | Self::AntonymToAnswer => ContentKind::Antonym,
        }
    }

    #[must_use]
    pub fn direction(self) -> Direction {
        match self {
            Self::SpellingToWord
            | Self::DefinitionToWord
            | Self::SynonymToWord
            | Self::AntonymToWord => Direction::ToWord,
            Self::SpellingToAnswer
            | Self::DefinitionToAnswer
            | Self::SynonymToAnswer
            | Self::AntonymToAnswer => Direction::ToAnswer,
        }
    }

    /// Spelling questions are free-text; everything else is multiple choice.
    #[must_use]
    pub fn is_free_text(self) -> bool {
        matches!(self.content(), ContentKind::Spelling)
    }

    /// Tag used in persisted statistics keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SpellingToWord => "spelling_toWord",
            Self::SpellingToAnswer => "spelling_toAnswer",
            Self::DefinitionToWord => "definition_toWord",
            Self::DefinitionToAnswer => "definition_toAnswer",
            Self::SynonymToWord => "synonym_toWord",
            Self::SynonymToAnswer => "synonym_toAnswer",
            Self::AntonymToWord => "antonym_toWord",
            Self::AntonymToAnswer => "antonym_toAnswer",
        }
    }
}

impl fmt::Display for QuestionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| unknown("question mode", s))
    }
}

//
// ─── SESSION CONFIG ────────────────────────────────────────────────────────────
//

/// Options fixed at the start of a study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    content: ContentKind,
    direction: Direction,
    session_mode: SessionMode,
    syn_ant_prompt: SynAntPrompt,
    missing_relation: MissingRelationPolicy,
}

impl SessionConfig {
    /// Build a configuration the way the study setup offers it.
    ///
    /// Spelling sessions always ask for the word, so `direction` is forced to
    /// `ToWord` when `content` is `Spelling`.
    #[must_use]
    pub fn new(content: ContentKind, direction: Direction, session_mode: SessionMode) -> Self {
        let direction = if content == ContentKind::Spelling {
            Direction::ToWord
        } else {
            direction
        };
        Self {
            content,
            direction,
            session_mode,
            syn_ant_prompt: SynAntPrompt::default(),
            missing_relation: MissingRelationPolicy::default(),
        }
    }

    /// Build a configuration for an explicit question mode, direction included.
    #[must_use]
    pub fn from_mode(mode: QuestionMode, session_mode: SessionMode) -> Self {
        Self {
            content: mode.content(),
            direction: mode.direction(),
            session_mode,
            syn_ant_prompt: SynAntPrompt::default(),
            missing_relation: MissingRelationPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_syn_ant_prompt(mut self, prompt: SynAntPrompt) -> Self {
        self.syn_ant_prompt = prompt;
        self
    }

    #[must_use]
    pub fn with_missing_relation(mut self, policy: MissingRelationPolicy) -> Self {
        self.missing_relation = policy;
        self
    }

    #[must_use]
    pub fn content(&self) -> ContentKind {
        self.content
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn session_mode(&self) -> SessionMode {
        self.session_mode
    }

    #[must_use]
    pub fn syn_ant_prompt(&self) -> SynAntPrompt {
        self.syn_ant_prompt
    }

    #[must_use]
    pub fn missing_relation(&self) -> MissingRelationPolicy {
        self.missing_relation
    }

    #[must_use]
    pub fn question_mode(&self) -> QuestionMode {
        QuestionMode::new(self.content, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spelling_forces_to_word() {
        let config = SessionConfig::new(ContentKind::Spelling, Direction::ToAnswer, SessionMode::Test);
        assert_eq!(config.direction(), Direction::ToWord);
        assert_eq!(config.question_mode(), QuestionMode::SpellingToWord);
    }

    #[test]
    fn from_mode_keeps_direction() {
        let config = SessionConfig::from_mode(QuestionMode::SpellingToAnswer, SessionMode::Normal);
        assert_eq!(config.question_mode(), QuestionMode::SpellingToAnswer);
    }

    #[test]
    fn mode_tags_roundtrip() {
        for mode in QuestionMode::ALL {
            let parsed: QuestionMode = mode.as_str().parse().unwrap();
            assert_eq!(parsed, mode);
            assert_eq!(QuestionMode::new(mode.content(), mode.direction()), mode);
        }
    }

    #[test]
    fn option_tags_parse() {
        assert_eq!("synonym".parse::<ContentKind>().unwrap(), ContentKind::Synonym);
        assert_eq!("toAnswer".parse::<Direction>().unwrap(), Direction::ToAnswer);
        assert_eq!("learning".parse::<SessionMode>().unwrap(), SessionMode::Learning);
        assert_eq!("all".parse::<SynAntPrompt>().unwrap(), SynAntPrompt::All);

        let err = "quiz".parse::<SessionMode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown session mode: quiz");
    }

    #[test]
    fn only_test_mode_is_finite() {
        assert!(SessionMode::Normal.is_infinite());
        assert!(SessionMode::Learning.is_infinite());
        assert!(!SessionMode::Test.is_infinite());
    }

    #[test]
    fn only_spelling_is_free_text() {
        assert!(QuestionMode::SpellingToAnswer.is_free_text());
        assert!(!QuestionMode::DefinitionToWord.is_free_text());
    }
}
