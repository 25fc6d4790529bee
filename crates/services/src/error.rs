//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use trek_core::model::{EventId, PairId};

/// Errors emitted by mini-games and the game loader.
///
/// Construction failures and bad placement commands are all recoverable: the
/// caller re-prompts or offers a retry, nothing is fatal.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameError {
    #[error("unsupported game kind: {0}")]
    UnknownKind(String),

    #[error("unknown event id: {0}")]
    UnknownEvent(EventId),

    #[error("event {0} is already placed")]
    AlreadyPlaced(EventId),

    #[error("option {index} is out of range for {options} options")]
    OptionOutOfRange { index: usize, options: usize },

    #[error("unknown pair id: {0}")]
    UnknownPair(PairId),

    #[error("pair {0} is already matched")]
    AlreadyMatched(PairId),
}

/// Errors emitted by `PreferencesService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreferencesServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
