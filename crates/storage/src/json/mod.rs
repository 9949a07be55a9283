//! File-backed list store.
//!
//! The whole collection of lists lives in one JSON document and is rewritten
//! every time a statistic changes, the same way a browser key-value store
//! would hold it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use vocab_core::model::{ItemStat, StatKey, StatsSnapshot, VocabList};

use crate::repository::{
    ListRepository, StatsRepository, Storage, StorageError, apply_stat, snapshot_of,
};

mod mapping;

pub use mapping::{EntryRecord, ListRecord};

/// JSON document store holding every list and its statistics.
#[derive(Clone)]
pub struct JsonListStore {
    path: PathBuf,
    lists: Arc<Mutex<Vec<VocabList>>>,
}

impl JsonListStore {
    /// Open the store at `path`, loading the current document.
    ///
    /// A missing file is treated as an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be read and
    /// `StorageError::Serialization` if it is not a valid list document.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let lists = read_document(&path)?;
        debug!(path = %path.display(), lists = lists.len(), "opened list store");
        Ok(Self {
            path,
            lists: Arc::new(Mutex::new(lists)),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, lists: &[VocabList]) -> Result<(), StorageError> {
        write_document(&self.path, lists)
    }
}

fn read_document(path: &Path) -> Result<Vec<VocabList>, StorageError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(StorageError::Io(err.to_string())),
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: Vec<ListRecord> =
        serde_json::from_str(&raw).map_err(|err| StorageError::Serialization(err.to_string()))?;

    let mut dropped = Vec::new();
    let lists = records
        .into_iter()
        .map(|record| record.into_list(&mut dropped))
        .collect();
    for reason in dropped {
        warn!(path = %path.display(), %reason, "dropped malformed data from list store");
    }
    Ok(lists)
}

fn write_document(path: &Path, lists: &[VocabList]) -> Result<(), StorageError> {
    let records: Vec<ListRecord> = lists.iter().map(ListRecord::from_list).collect();
    let json = serde_json::to_string_pretty(&records)
        .map_err(|err| StorageError::Serialization(err.to_string()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| StorageError::Io(err.to_string()))?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, json).map_err(|err| StorageError::Io(err.to_string()))?;
    fs::rename(&tmp, path).map_err(|err| StorageError::Io(err.to_string()))?;
    Ok(())
}

impl ListRepository for JsonListStore {
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
        self.persist(lists)?;
        *guard = lists.to_vec();
        Ok(())
    }
}

impl StatsRepository for JsonListStore {
    fn load_stats(&self) -> Result<StatsSnapshot, StorageError> {
        let guard = self
            .lists
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(snapshot_of(&guard))
    }

    fn save_stat(&self, key: &StatKey, stat: ItemStat) -> Result<(), StorageError> {
        let mut guard = self
            .lists
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        apply_stat(&mut guard, key, stat)?;
        self.persist(&guard)
    }
}

impl Storage {
    /// Build a `Storage` backed by a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the existing document cannot be loaded.
    pub fn json_file(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Ok(Self::from_repository(JsonListStore::open(path)?))
    }
}
