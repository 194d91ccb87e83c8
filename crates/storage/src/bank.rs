use std::collections::HashSet;

use quiz_core::model::{Level, Question, Quiz, QuizError, QuizId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_QUIZZES: &str = include_str!("../data/quizzes.json");

/// Errors raised while building a question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("malformed question bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("quiz {id}: {source}")]
    InvalidQuiz {
        id: String,
        #[source]
        source: QuizError,
    },

    #[error("duplicate quiz id: {0}")]
    DuplicateId(QuizId),
}

/// Read-only source of quizzes keyed by id.
pub trait QuestionBank: Send + Sync {
    /// Look up a quiz by id. `None` when the bank has no such quiz.
    fn get_quiz_by_id(&self, id: &QuizId) -> Option<Quiz>;

    /// All quizzes in bank order.
    fn list_quizzes(&self) -> Vec<Quiz>;
}

/// Serialized shape of a quiz in the bundled JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRecord {
    pub id: QuizId,
    pub title: String,
    pub level: Level,
    pub questions: Vec<QuestionRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub title: String,
    pub alternatives: Vec<String>,
    pub correct: usize,
}

impl QuizRecord {
    #[must_use]
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id().clone(),
            title: quiz.title().to_owned(),
            level: quiz.level(),
            questions: quiz
                .questions()
                .iter()
                .map(|q| QuestionRecord {
                    title: q.title().to_owned(),
                    alternatives: q.alternatives().to_vec(),
                    correct: q.correct(),
                })
                .collect(),
        }
    }

    /// Convert the record into a validated domain `Quiz`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the quiz or one of its questions is invalid.
    pub fn into_quiz(self) -> Result<Quiz, QuizError> {
        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, q)| {
                Question::new(q.title, q.alternatives, q.correct)
                    .map_err(|source| QuizError::InvalidQuestion { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Quiz::new(self.id, self.title, self.level, questions)
    }
}

/// In-process question bank. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct StaticQuestionBank {
    quizzes: Vec<Quiz>,
}

impl StaticQuestionBank {
    /// Bank with the quizzes shipped in `data/quizzes.json`.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the bundled data is malformed.
    pub fn builtin() -> Result<Self, BankError> {
        Self::from_json(BUILTIN_QUIZZES)
    }

    /// # Errors
    ///
    /// Returns `BankError` on malformed JSON, invalid quizzes or duplicate ids.
    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let records: Vec<QuizRecord> = serde_json::from_str(json)?;
        let quizzes = records
            .into_iter()
            .map(|record| {
                let id = record.id.to_string();
                record
                    .into_quiz()
                    .map_err(|source| BankError::InvalidQuiz { id, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_quizzes(quizzes)
    }

    /// # Errors
    ///
    /// Returns `BankError::DuplicateId` if two quizzes share an id.
    pub fn from_quizzes(quizzes: Vec<Quiz>) -> Result<Self, BankError> {
        let mut seen = HashSet::new();
        for quiz in &quizzes {
            if !seen.insert(quiz.id().clone()) {
                return Err(BankError::DuplicateId(quiz.id().clone()));
            }
        }
        Ok(Self { quizzes })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }
}

impl QuestionBank for StaticQuestionBank {
    fn get_quiz_by_id(&self, id: &QuizId) -> Option<Quiz> {
        self.quizzes.iter().find(|quiz| quiz.id() == id).cloned()
    }

    fn list_quizzes(&self) -> Vec<Quiz> {
        self.quizzes.clone()
    }
}
