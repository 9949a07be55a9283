use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::info;

use storage::repository::{ListRepository, StatsRepository, Storage};
use vocab_core::model::{ListId, SessionConfig, VocabList};

use crate::Clock;
use crate::error::SessionError;

use super::engine::StudySession;
use super::feedback::WordLookup;
use super::pool::WordPool;

/// Starts study sessions against a storage backend.
#[derive(Clone)]
pub struct StudyService {
    clock: Clock,
    lists: Arc<dyn ListRepository>,
    stats: Arc<dyn StatsRepository>,
}

impl StudyService {
    #[must_use]
    pub fn new(clock: Clock, storage: &Storage) -> Self {
        Self {
            clock,
            lists: Arc::clone(&storage.lists),
            stats: Arc::clone(&storage.stats),
        }
    }

    /// All stored lists.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the lists cannot be loaded.
    pub fn lists(&self) -> Result<Vec<VocabList>, SessionError> {
        Ok(self.lists.load_lists()?)
    }

    /// Start a session over the selected lists.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoListsSelected` or `SessionError::EmptyPool`
    /// when there is nothing to study, and `SessionError::Storage` if the
    /// lists cannot be loaded.
    pub fn start_session(
        &self,
        selected: &[ListId],
        config: SessionConfig,
    ) -> Result<StudySession, SessionError> {
        let pool = self.pool_for(selected)?;
        info!(
            lists = selected.len(),
            words = pool.len(),
            mode = %config.question_mode(),
            session_mode = config.session_mode().as_str(),
            "starting study session"
        );
        Ok(StudySession::new(pool.into_entries(), config, Arc::clone(&self.stats))
            .with_clock(self.clock))
    }

    /// Like [`StudyService::start_session`], with a caller-supplied generator.
    ///
    /// # Errors
    ///
    /// Same as [`StudyService::start_session`].
    pub fn start_session_with_rng(
        &self,
        selected: &[ListId],
        config: SessionConfig,
        rng: StdRng,
    ) -> Result<StudySession, SessionError> {
        let pool = self.pool_for(selected)?;
        Ok(
            StudySession::with_rng(pool.into_entries(), config, Arc::clone(&self.stats), rng)
                .with_clock(self.clock),
        )
    }

    /// Lookup table for feedback, covering every stored list.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the lists cannot be loaded.
    pub fn lookup(&self) -> Result<WordLookup, SessionError> {
        Ok(WordLookup::from_lists(&self.lists()?))
    }

    fn pool_for(&self, selected: &[ListId]) -> Result<WordPool, SessionError> {
        let lists = self.lists()?;
        WordPool::from_lists(&lists, selected)
    }
}
