//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted while starting a study session.
///
/// Once a session is running nothing is fatal: grading and persistence
/// problems are logged and absorbed by the engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("select at least one list to study")]
    NoListsSelected,
    #[error("the selected lists contain no words")]
    EmptyPool,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
