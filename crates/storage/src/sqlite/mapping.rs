use quiz_core::model::{HistoryEntry, HistoryEntryId, Level};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn history_id_to_i64(id: HistoryEntryId) -> Result<i64, StorageError> {
    i64::try_from(id.value())
        .map_err(|_| StorageError::Serialization("history id overflow".into()))
}

fn i64_to_u32(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn level_from_i64(v: i64) -> Result<Level, StorageError> {
    u8::try_from(v)
        .ok()
        .and_then(Level::from_rank)
        .ok_or_else(|| StorageError::Serialization(format!("invalid level: {v}")))
}

pub(crate) fn map_history_row(row: &sqlx::sqlite::SqliteRow) -> Result<HistoryEntry, StorageError> {
    let id: i64 = row.try_get("id").map_err(ser)?;
    let id = u64::try_from(id)
        .map(HistoryEntryId::new)
        .map_err(|_| StorageError::Serialization(format!("invalid id: {id}")))?;
    let quiz_title: String = row.try_get("quiz_title").map_err(ser)?;
    let level = level_from_i64(row.try_get("level").map_err(ser)?)?;
    let points = i64_to_u32("points", row.try_get("points").map_err(ser)?)?;
    let questions = i64_to_u32("questions", row.try_get("questions").map_err(ser)?)?;

    HistoryEntry::from_persisted(id, quiz_title, level, points, questions).map_err(ser)
}
