mod config;
mod entry;
mod ids;
mod list;
mod question;
mod session;
mod stats;

pub use ids::{ListId, ParseIdError};

pub use config::{
    ConfigError, ContentKind, Direction, MissingRelationPolicy, QuestionMode, SessionConfig,
    SessionMode, SynAntPrompt,
};
pub use entry::{EntryDraft, EntryError, PoolEntry, VocabularyEntry};
pub use list::{DEFAULT_LIST_NAME, ListError, VocabList};
pub use question::{Answer, Prompt, PromptSegment, Question, QuestionBody};
pub use session::{SessionStats, SessionSummary};
pub use stats::{ItemStat, StatKey, StatKeyError, StatsSnapshot};
