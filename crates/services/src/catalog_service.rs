use std::sync::Arc;

use quiz_core::model::{Level, Quiz, QuizId};
use storage::bank::QuestionBank;

use crate::error::CatalogError;

/// Presentation-agnostic quiz list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizListItem {
    pub id: QuizId,
    pub title: String,
    pub level: Level,
    pub question_count: usize,
}

impl QuizListItem {
    #[must_use]
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id().clone(),
            title: quiz.title().to_owned(),
            level: quiz.level(),
            question_count: quiz.len(),
        }
    }
}

/// Read access to the question bank for the home screen.
#[derive(Clone)]
pub struct QuizCatalogService {
    bank: Arc<dyn QuestionBank>,
}

impl QuizCatalogService {
    #[must_use]
    pub fn new(bank: Arc<dyn QuestionBank>) -> Self {
        Self { bank }
    }

    /// Quizzes in bank order, optionally restricted to one level.
    #[must_use]
    pub fn list(&self, level: Option<Level>) -> Vec<QuizListItem> {
        self.bank
            .list_quizzes()
            .iter()
            .filter(|quiz| level.is_none_or(|level| quiz.level() == level))
            .map(QuizListItem::from_quiz)
            .collect()
    }

    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the bank has no such quiz.
    pub fn get(&self, id: &QuizId) -> Result<Quiz, CatalogError> {
        self.bank
            .get_quiz_by_id(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }
}
