use async_trait::async_trait;
use quiz_core::model::{HistoryEntry, HistoryEntryId};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Append-only store of completed quizzes.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Record a completed quiz.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if an entry with the same id exists.
    async fn append(&self, entry: &HistoryEntry) -> Result<(), StorageError>;

    /// Most recent entries first, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_recent(&self, limit: u32) -> Result<Vec<HistoryEntry>, StorageError>;

    /// Fetch a single entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing.
    async fn get(&self, id: HistoryEntryId) -> Result<HistoryEntry, StorageError>;

    /// Delete an entry from the history list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing.
    async fn remove(&self, id: HistoryEntryId) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<Vec<HistoryEntry>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl HistoryRepository for InMemoryRepository {
    async fn append(&self, entry: &HistoryEntry) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.iter().any(|existing| existing.id() == entry.id()) {
            return Err(StorageError::Conflict);
        }
        guard.push(entry.clone());
        Ok(())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<HistoryEntry>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut out = guard.clone();
        out.sort_by_key(|entry| std::cmp::Reverse(entry.id()));
        out.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(out)
    }

    async fn get(&self, id: HistoryEntryId) -> Result<HistoryEntry, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .iter()
            .find(|entry| entry.id() == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn remove(&self, id: HistoryEntryId) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let before = guard.len();
        guard.retain(|entry| entry.id() != id);
        if guard.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub history: Arc<dyn HistoryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let history: Arc<dyn HistoryRepository> = Arc::new(InMemoryRepository::new());
        Self { history }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Level;

    fn entry(id: u64, points: u32) -> HistoryEntry {
        HistoryEntry::from_persisted(HistoryEntryId::new(id), "Math", Level::Easy, points, 3)
            .unwrap()
    }

    #[tokio::test]
    async fn lists_newest_first_with_limit() {
        let repo = InMemoryRepository::new();
        repo.append(&entry(10, 1)).await.unwrap();
        repo.append(&entry(30, 3)).await.unwrap();
        repo.append(&entry(20, 2)).await.unwrap();

        let listed = repo.list_recent(2).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|e| e.id().value()).collect();
        assert_eq!(ids, vec![30, 20]);
    }

    #[tokio::test]
    async fn duplicate_append_conflicts() {
        let repo = InMemoryRepository::new();
        repo.append(&entry(1, 1)).await.unwrap();
        let err = repo.append(&entry(1, 2)).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn remove_deletes_once() {
        let repo = InMemoryRepository::new();
        repo.append(&entry(5, 2)).await.unwrap();
        repo.remove(HistoryEntryId::new(5)).await.unwrap();
        assert!(matches!(
            repo.get(HistoryEntryId::new(5)).await,
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            repo.remove(HistoryEntryId::new(5)).await,
            Err(StorageError::NotFound)
        ));
    }
}
