use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::HistoryEntryId;
use crate::model::level::Level;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HistoryEntryError {
    #[error("quiz title cannot be empty")]
    EmptyTitle,

    #[error("points ({points}) exceed question count ({questions})")]
    PointsExceedQuestions { points: u32, questions: u32 },

    #[error("too many questions for a single quiz: {len}")]
    TooManyQuestions { len: usize },
}

/// Outcome of a completed session, before it gets an identity in the history store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub quiz_title: String,
    pub level: Level,
    pub points: u32,
    pub questions: u32,
    pub completed_at: DateTime<Utc>,
}

/// Durable record of a completed quiz. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    id: HistoryEntryId,
    quiz_title: String,
    level: Level,
    points: u32,
    questions: u32,
}

impl HistoryEntry {
    /// Rehydrate a history entry from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `HistoryEntryError` if the title is blank or `points > questions`.
    pub fn from_persisted(
        id: HistoryEntryId,
        quiz_title: impl Into<String>,
        level: Level,
        points: u32,
        questions: u32,
    ) -> Result<Self, HistoryEntryError> {
        let quiz_title = quiz_title.into();
        if quiz_title.trim().is_empty() {
            return Err(HistoryEntryError::EmptyTitle);
        }
        if points > questions {
            return Err(HistoryEntryError::PointsExceedQuestions { points, questions });
        }
        Ok(Self {
            id,
            quiz_title,
            level,
            points,
            questions,
        })
    }

    /// Build the entry for a finished session. The id is derived from the completion time.
    ///
    /// # Errors
    ///
    /// Returns `HistoryEntryError` if the result is inconsistent.
    pub fn from_result(result: &QuizResult) -> Result<Self, HistoryEntryError> {
        Self::from_persisted(
            HistoryEntryId::from_millis(result.completed_at.timestamp_millis()),
            result.quiz_title.clone(),
            result.level,
            result.points,
            result.questions,
        )
    }

    #[must_use]
    pub fn id(&self) -> HistoryEntryId {
        self.id
    }

    #[must_use]
    pub fn quiz_title(&self) -> &str {
        &self.quiz_title
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn questions(&self) -> u32 {
        self.questions
    }

    /// Instant the entry was recorded, recovered from the id.
    #[must_use]
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.id.value()).ok()?;
        DateTime::<Utc>::from_timestamp_millis(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn entry_id_is_completion_millis() {
        let result = QuizResult {
            quiz_title: "Math".into(),
            level: Level::Easy,
            points: 2,
            questions: 3,
            completed_at: fixed_now(),
        };
        let entry = HistoryEntry::from_result(&result).unwrap();
        assert_eq!(entry.id().value(), 1_700_000_000_000);
        assert_eq!(entry.recorded_at(), Some(fixed_now()));
        assert_eq!(entry.points(), 2);
        assert_eq!(entry.questions(), 3);
    }

    #[test]
    fn rejects_points_above_questions() {
        let err =
            HistoryEntry::from_persisted(HistoryEntryId::new(1), "Math", Level::Hard, 4, 3)
                .unwrap_err();
        assert_eq!(
            err,
            HistoryEntryError::PointsExceedQuestions {
                points: 4,
                questions: 3
            }
        );
    }
}
