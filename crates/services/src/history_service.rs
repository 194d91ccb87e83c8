use chrono::{DateTime, Utc};
use std::sync::Arc;

use quiz_core::model::{HistoryEntry, HistoryEntryId, Level};
use storage::repository::HistoryRepository;

use crate::error::HistoryServiceError;

/// Presentation-agnostic history row. The UI formats dates and scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryListItem {
    pub id: HistoryEntryId,
    pub quiz_title: String,
    pub level: Level,
    pub points: u32,
    pub questions: u32,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl HistoryListItem {
    #[must_use]
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id(),
            quiz_title: entry.quiz_title().to_owned(),
            level: entry.level(),
            points: entry.points(),
            questions: entry.questions(),
            recorded_at: entry.recorded_at(),
        }
    }
}

/// Facade over the history store for the history screen.
#[derive(Clone)]
pub struct HistoryService {
    history: Arc<dyn HistoryRepository>,
}

impl HistoryService {
    #[must_use]
    pub fn new(history: Arc<dyn HistoryRepository>) -> Self {
        Self { history }
    }

    /// # Errors
    ///
    /// Returns `HistoryServiceError::Storage` on repository failures.
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<HistoryListItem>, HistoryServiceError> {
        let entries = self.history.list_recent(limit).await?;
        Ok(entries.iter().map(HistoryListItem::from_entry).collect())
    }

    /// # Errors
    ///
    /// Returns `HistoryServiceError::Storage` if the entry is missing or removal fails.
    pub async fn remove(&self, id: HistoryEntryId) -> Result<(), HistoryServiceError> {
        self.history.remove(id).await?;
        tracing::info!(entry_id = %id, "history entry removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, StorageError};

    #[tokio::test]
    async fn lists_and_removes_entries() {
        let repo = Arc::new(InMemoryRepository::new());
        let id = HistoryEntryId::from_millis(fixed_now().timestamp_millis());
        let entry = HistoryEntry::from_persisted(id, "Math", Level::Easy, 2, 3).unwrap();
        repo.append(&entry).await.unwrap();

        let service = HistoryService::new(repo);
        let items = service.list_recent(10).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].points, 2);
        assert_eq!(items[0].recorded_at, Some(fixed_now()));

        service.remove(id).await.unwrap();
        assert!(service.list_recent(10).await.unwrap().is_empty());
        assert!(matches!(
            service.remove(id).await,
            Err(HistoryServiceError::Storage(StorageError::NotFound))
        ));
    }
}
