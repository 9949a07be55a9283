use thiserror::Error;

use crate::model::{ConfigError, EntryError, ListError, ParseIdError, StatKeyError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Entry(#[from] EntryError),
    #[error(transparent)]
    List(#[from] ListError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    StatKey(#[from] StatKeyError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
}
