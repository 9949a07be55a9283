use vocab_core::model::{ListId, PoolEntry, VocabList};

use crate::error::SessionError;

/// Entries drawn from the lists chosen for a session, in list order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordPool {
    entries: Vec<PoolEntry>,
}

impl WordPool {
    /// Flatten the words of every selected list into one pool.
    ///
    /// Lists keep their storage order; ids in `selected` that match no list
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoListsSelected` when `selected` is empty and
    /// `SessionError::EmptyPool` when the selected lists hold no words.
    pub fn from_lists(lists: &[VocabList], selected: &[ListId]) -> Result<Self, SessionError> {
        if selected.is_empty() {
            return Err(SessionError::NoListsSelected);
        }

        let entries: Vec<PoolEntry> = lists
            .iter()
            .filter(|list| selected.contains(list.id()))
            .flat_map(|list| list.pool_entries())
            .collect();

        if entries.is_empty() {
            return Err(SessionError::EmptyPool);
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<PoolEntry> {
        self.entries
    }
}
