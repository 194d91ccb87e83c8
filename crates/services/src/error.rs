//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{HistoryEntryError, QuizId, QuizSessionError};
use storage::bank::BankError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the quiz session controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("quiz not found: {0}")]
    NotFound(QuizId),
    #[error("no quiz loaded")]
    NotLoaded,
    #[error("a quiz is already loaded")]
    AlreadyStarted,
    #[error(transparent)]
    State(#[from] QuizSessionError),
    #[error(transparent)]
    Result(#[from] HistoryEntryError),
}

/// Errors emitted by `QuizCatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("quiz not found: {0}")]
    NotFound(QuizId),
}

/// Errors emitted by `HistoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryServiceError {
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
    Bank(#[from] BankError),
}
