use std::sync::{Arc, Mutex};

use thiserror::Error;
use vocab_core::model::{ItemStat, ListId, StatKey, StatsSnapshot, VocabList};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("storage lock poisoned: {0}")]
    Lock(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read/write access to per-item study statistics.
///
/// The study engine reads one snapshot when a session starts and writes each
/// updated statistic back immediately after grading.
pub trait StatsRepository: Send + Sync {
    /// Snapshot of every statistic across all lists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn load_stats(&self) -> Result<StatsSnapshot, StorageError>;

    /// Persist the statistic for `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the key's list does not exist, or
    /// other storage errors.
    fn save_stat(&self, key: &StatKey, stat: ItemStat) -> Result<(), StorageError>;
}

/// Repository contract for the collection of vocabulary lists.
pub trait ListRepository: Send + Sync {
    /// Load every list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the lists cannot be read or decoded.
    fn load_lists(&self) -> Result<Vec<VocabList>, StorageError>;

    /// Replace the stored collection with `lists`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the lists cannot be stored.
    fn save_lists(&self, lists: &[VocabList]) -> Result<(), StorageError>;
}

pub(crate) fn snapshot_of(lists: &[VocabList]) -> StatsSnapshot {
    lists
        .iter()
        .flat_map(|list| list.stats().iter().map(|(k, v)| (k.clone(), *v)))
        .collect()
}

pub(crate) fn apply_stat(
    lists: &mut [VocabList],
    key: &StatKey,
    stat: ItemStat,
) -> Result<(), StorageError> {
    let list = find_list_mut(lists, key.list_id()).ok_or(StorageError::NotFound)?;
    list.set_stat(key.clone(), stat);
    Ok(())
}

fn find_list_mut<'a>(lists: &'a mut [VocabList], id: &ListId) -> Option<&'a mut VocabList> {
    lists.iter_mut().find(|list| list.id() == id)
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    lists: Arc<Mutex<Vec<VocabList>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_lists(lists: Vec<VocabList>) -> Self {
        Self {
            lists: Arc::new(Mutex::new(lists)),
            fail_writes: Arc::new(Mutex::new(false)),
        }
    }

    /// Make every subsequent `save_stat` fail, to exercise best-effort persistence.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut guard) = self.fail_writes.lock() {
            *guard = fail;
        }
    }

    fn writes_fail(&self) -> Result<bool, StorageError> {
        self.fail_writes
            .lock()
            .map(|guard| *guard)
            .map_err(|e| StorageError::Lock(e.to_string()))
    }
}

impl StatsRepository for InMemoryRepository {
    fn load_stats(&self) -> Result<StatsSnapshot, StorageError> {
        let guard = self
            .lists
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(snapshot_of(&guard))
    }

    fn save_stat(&self, key: &StatKey, stat: ItemStat) -> Result<(), StorageError> {
        if self.writes_fail()? {
            return Err(StorageError::Io("writes disabled".into()));
        }
        let mut guard = self
            .lists
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        apply_stat(&mut guard, key, stat)
    }
}

impl ListRepository for InMemoryRepository {
    fn load_lists(&self) -> Result<Vec<VocabList>, StorageError> {
        let guard = self
            .lists
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save_lists(&self, lists: &[VocabList]) -> Result<(), StorageError> {
        let mut guard = self
            .lists
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        *guard = lists.to_vec();
        Ok(())
    }
}

/// Aggregates list and statistics repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub lists: Arc<dyn ListRepository>,
    pub stats: Arc<dyn StatsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    /// Use one value for both lists and statistics.
    #[must_use]
    pub fn from_repository<R>(repo: R) -> Self
    where
        R: ListRepository + StatsRepository + Clone + 'static,
    {
        let lists: Arc<dyn ListRepository> = Arc::new(repo.clone());
        let stats: Arc<dyn StatsRepository> = Arc::new(repo);
        Self { lists, stats }
    }
}
