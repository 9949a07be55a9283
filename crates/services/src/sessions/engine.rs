use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use storage::repository::StatsRepository;
use vocab_core::Clock;
use vocab_core::model::{
    Answer, ItemStat, PoolEntry, Question, QuestionBody, QuestionMode, SessionConfig,
    SessionMode, SessionStats, SessionSummary, StatKey, StatsSnapshot,
};
use vocab_core::text::answers_match;

use super::progress::SessionProgress;
use super::questions::{GeneratedQuestion, generate_question};
use super::queue::{QueueItem, build_queue};

/// Learning sessions bring a missed item back within this many draws.
const RELEARN_DELAY: usize = 3;

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// Why a session has no further question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoneReason {
    /// Every question of a finite session was answered.
    Complete,
    /// The current mode has nothing to ask about the pool.
    NoEligibleWords,
}

impl DoneReason {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            DoneReason::Complete => "Session complete.",
            DoneReason::NoEligibleWords => "No eligible words for this mode.",
        }
    }
}

/// Result of asking for the next question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Next {
    Question(Question),
    Done(DoneReason),
}

impl Next {
    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        match self {
            Next::Question(question) => Some(question),
            Next::Done(_) => None,
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Next::Done(_))
    }
}

/// Everything the UI needs to show feedback for one graded answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedAnswer {
    pub correct: bool,
    /// True once a finite session has been fully answered.
    pub done: bool,
    pub expected: String,
    /// Submitted text, or the text of the selected choice (empty if the index
    /// was out of range).
    pub your: String,
    pub mode: QuestionMode,
    pub word: String,
    pub definition: String,
    pub answer_index: Option<usize>,
    pub selected_index: Option<usize>,
}

/// Outcome of `StudySession::submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Graded(GradedAnswer),
    /// There was no question waiting for an answer.
    Done,
}

impl Submission {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, Submission::Graded(graded) if graded.correct)
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        match self {
            Submission::Graded(graded) => graded.done,
            Submission::Done => true,
        }
    }

    #[must_use]
    pub fn graded(&self) -> Option<&GradedAnswer> {
        match self {
            Submission::Graded(graded) => Some(graded),
            Submission::Done => None,
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

struct Pending {
    item: QueueItem,
    generated: GeneratedQuestion,
}

/// One study session over a fixed pool and configuration.
///
/// The session owns its question queue and a working copy of the item
/// statistics. Every graded answer is written through to the
/// `StatsRepository`; a failed write is logged and does not stop the session.
pub struct StudySession {
    pool: Vec<PoolEntry>,
    config: SessionConfig,
    repository: Arc<dyn StatsRepository>,
    stats: StatsSnapshot,
    queue: VecDeque<QueueItem>,
    total: Option<usize>,
    answered: usize,
    pending: Option<Pending>,
    session_stats: SessionStats,
    rng: StdRng,
    clock: Clock,
    started_at: DateTime<Utc>,
}

impl StudySession {
    /// Start a session with an OS-seeded random generator and the system clock.
    #[must_use]
    pub fn new(
        pool: Vec<PoolEntry>,
        config: SessionConfig,
        repository: Arc<dyn StatsRepository>,
    ) -> Self {
        Self::with_rng(pool, config, repository, StdRng::from_os_rng())
    }

    /// Start a session drawing all randomness from `rng`.
    ///
    /// The statistics snapshot is read once here. If it cannot be read the
    /// session starts without history.
    #[must_use]
    pub fn with_rng(
        pool: Vec<PoolEntry>,
        config: SessionConfig,
        repository: Arc<dyn StatsRepository>,
        rng: StdRng,
    ) -> Self {
        let stats = repository.load_stats().unwrap_or_else(|err| {
            warn!(error = %err, "could not load item statistics, starting without history");
            StatsSnapshot::new()
        });
        let clock = Clock::default();

        let mut session = Self {
            pool,
            config,
            repository,
            stats,
            queue: VecDeque::new(),
            total: None,
            answered: 0,
            pending: None,
            session_stats: SessionStats::new(),
            rng,
            started_at: clock.now(),
            clock,
        };
        session.queue = session.seed();
        if session.config.session_mode() == SessionMode::Test {
            session.total = Some(session.queue.len());
        }
        session
    }

    /// Use `clock` for session timestamps. Restarts the session timer.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self.started_at = clock.now();
        self
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn pool(&self) -> &[PoolEntry] {
        &self.pool
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Working copy of the statistic for `key`, including this session's answers.
    #[must_use]
    pub fn item_stat(&self, key: &StatKey) -> Option<&ItemStat> {
        self.stats.get(key)
    }

    fn seed(&mut self) -> VecDeque<QueueItem> {
        build_queue(&self.pool, &self.config, &self.stats, &mut self.rng)
    }

    fn is_finished(&self) -> bool {
        self.total.is_some_and(|total| self.answered >= total)
    }

    /// A finite session over a non-empty pool that seeded nothing had no
    /// eligible words to begin with.
    fn finished_reason(&self) -> DoneReason {
        if self.total == Some(0) && !self.pool.is_empty() {
            DoneReason::NoEligibleWords
        } else {
            DoneReason::Complete
        }
    }

    /// Draw the next question.
    ///
    /// A question that was shown but never answered is discarded.
    pub fn next(&mut self) -> Next {
        self.pending = None;
        if self.is_finished() {
            return Next::Done(self.finished_reason());
        }

        let item = match self.queue.pop_front() {
            Some(item) => item,
            None if self.config.session_mode() == SessionMode::Test => {
                return Next::Done(DoneReason::Complete);
            }
            None => {
                self.queue = self.seed();
                debug!(items = self.queue.len(), "reseeded exhausted study queue");
                match self.queue.pop_front() {
                    Some(item) => item,
                    None => return Next::Done(DoneReason::NoEligibleWords),
                }
            }
        };

        let Some(target) = self.pool.get(item.index) else {
            return Next::Done(DoneReason::NoEligibleWords);
        };
        let generated = generate_question(
            &self.pool,
            target,
            item.mode,
            self.config.syn_ant_prompt(),
            &mut self.rng,
        );
        let question = generated.question.clone();
        self.pending = Some(Pending { item, generated });
        Next::Question(question)
    }

    /// The question currently waiting for an answer.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.pending.as_ref().map(|p| &p.generated.question)
    }

    /// Expected answer of the waiting question, without grading anything.
    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.generated.expected.as_str())
    }

    /// Grade `answer` against the waiting question.
    ///
    /// Free-text answers are compared after normalization; multiple-choice
    /// answers by index. An answer of the wrong kind is graded incorrect.
    pub fn submit(&mut self, answer: Answer) -> Submission {
        let Some(Pending { item, generated }) = self.pending.take() else {
            return Submission::Done;
        };
        let GeneratedQuestion { question, expected } = generated;

        let (correct, your, selected_index) = match (question.body(), answer) {
            (QuestionBody::Input, Answer::Text(text)) => {
                (answers_match(&text, &expected), text, None)
            }
            (
                QuestionBody::MultipleChoice {
                    choices,
                    answer_index,
                },
                Answer::Choice(index),
            ) => (
                index == *answer_index,
                choices.get(index).cloned().unwrap_or_default(),
                Some(index),
            ),
            (_, answer) => {
                debug!(?answer, mode = %item.mode, "answer kind does not match question");
                (false, String::new(), None)
            }
        };

        let (word, definition, key) = match self.pool.get(item.index) {
            Some(entry) => (
                entry.word().to_owned(),
                entry.definition().to_owned(),
                Some(StatKey::new(entry.list_id().clone(), entry.word(), item.mode)),
            ),
            None => (String::new(), String::new(), None),
        };
        if let Some(key) = key {
            self.record_item(key, correct);
        }
        self.session_stats.record(correct);

        if !correct && self.config.session_mode() == SessionMode::Learning {
            let at = self.queue.len().min(RELEARN_DELAY - 1);
            self.queue.insert(at, item);
        }

        self.answered += 1;
        let done = self.is_finished();
        debug!(
            mode = %item.mode,
            %word,
            correct,
            answered = self.answered,
            "graded answer"
        );

        Submission::Graded(GradedAnswer {
            correct,
            done,
            expected,
            your,
            mode: item.mode,
            word,
            definition,
            answer_index: question.answer_index(),
            selected_index,
        })
    }

    fn record_item(&mut self, key: StatKey, correct: bool) {
        let stat = {
            let stat = self.stats.entry(key.clone()).or_default();
            stat.record(correct);
            *stat
        };
        if let Err(err) = self.repository.save_stat(&key, stat) {
            warn!(%key, error = %err, "failed to persist item statistic");
        }
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            answered: self.answered,
            total: self.total,
            infinite: self.config.session_mode().is_infinite(),
        }
    }

    /// Running totals of this session.
    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.session_stats
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(self.session_stats, self.started_at, self.clock.now())
    }
}
