use async_trait::async_trait;
use quiz_core::model::{HistoryEntry, HistoryEntryId};

use super::SqliteRepository;
use super::mapping::{history_id_to_i64, map_history_row};
use crate::repository::{HistoryRepository, StorageError};

#[async_trait]
impl HistoryRepository for SqliteRepository {
    async fn append(&self, entry: &HistoryEntry) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO quiz_history (id, quiz_title, level, points, questions)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(id) DO NOTHING
            ",
        )
        .bind(history_id_to_i64(entry.id())?)
        .bind(entry.quiz_title())
        .bind(i64::from(entry.level().rank()))
        .bind(i64::from(entry.points()))
        .bind(i64::from(entry.questions()))
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::Conflict);
        }
        Ok(())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<HistoryEntry>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, quiz_title, level, points, questions
                FROM quiz_history
                ORDER BY id DESC
                LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_history_row(&row)?);
        }
        Ok(out)
    }

    async fn get(&self, id: HistoryEntryId) -> Result<HistoryEntry, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, quiz_title, level, points, questions
                FROM quiz_history
                WHERE id = ?1
            ",
        )
        .bind(history_id_to_i64(id)?)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .ok_or(StorageError::NotFound)?;

        map_history_row(&row)
    }

    async fn remove(&self, id: HistoryEntryId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM quiz_history WHERE id = ?1")
            .bind(history_id_to_i64(id)?)
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
