use thiserror::Error;

use crate::model::ids::QuizId;
use crate::model::level::Level;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question title cannot be empty")]
    EmptyTitle,

    #[error("a question needs at least two alternatives, got {len}")]
    TooFewAlternatives { len: usize },

    #[error("alternative {index} is empty")]
    EmptyAlternative { index: usize },

    #[error("correct index {correct} is out of range for {len} alternatives")]
    CorrectOutOfRange { correct: usize, len: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz title cannot be empty")]
    EmptyTitle,

    #[error("quiz has no questions")]
    NoQuestions,

    #[error("question {index}: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question with exactly one correct alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    title: String,
    alternatives: Vec<String>,
    correct: usize,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError` if the title or an alternative is blank, there are fewer
    /// than two alternatives, or `correct` does not index into `alternatives`.
    pub fn new(
        title: impl Into<String>,
        alternatives: Vec<String>,
        correct: usize,
    ) -> Result<Self, QuestionError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(QuestionError::EmptyTitle);
        }
        if alternatives.len() < 2 {
            return Err(QuestionError::TooFewAlternatives {
                len: alternatives.len(),
            });
        }
        if let Some(index) = alternatives.iter().position(|alt| alt.trim().is_empty()) {
            return Err(QuestionError::EmptyAlternative { index });
        }
        if correct >= alternatives.len() {
            return Err(QuestionError::CorrectOutOfRange {
                correct,
                len: alternatives.len(),
            });
        }

        Ok(Self {
            title,
            alternatives,
            correct,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        self.correct == index
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// An ordered set of questions under one title and difficulty level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    title: String,
    level: Level,
    questions: Vec<Question>,
}

impl Quiz {
    /// # Errors
    ///
    /// Returns `QuizError::EmptyTitle` or `QuizError::NoQuestions`.
    pub fn new(
        id: QuizId,
        title: impl Into<String>,
        level: Level,
        questions: Vec<Question>,
    ) -> Result<Self, QuizError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(QuizError::EmptyTitle);
        }
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        Ok(Self {
            id,
            title,
            level,
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuizId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed quiz; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn question_validates_correct_index() {
        let err = Question::new("2 + 2?", alts(&["3", "4"]), 2).unwrap_err();
        assert_eq!(err, QuestionError::CorrectOutOfRange { correct: 2, len: 2 });
    }

    #[test]
    fn question_rejects_single_alternative() {
        let err = Question::new("Only one?", alts(&["yes"]), 0).unwrap_err();
        assert_eq!(err, QuestionError::TooFewAlternatives { len: 1 });
    }

    #[test]
    fn question_rejects_blank_alternative() {
        let err = Question::new("Pick", alts(&["a", " "]), 0).unwrap_err();
        assert_eq!(err, QuestionError::EmptyAlternative { index: 1 });
    }

    #[test]
    fn quiz_requires_questions() {
        let err = Quiz::new(QuizId::new("q").unwrap(), "Empty", Level::Easy, vec![]).unwrap_err();
        assert_eq!(err, QuizError::NoQuestions);
    }

    #[test]
    fn quiz_exposes_last_index() {
        let q = Question::new("2 + 2?", alts(&["3", "4"]), 1).unwrap();
        let quiz = Quiz::new(
            QuizId::new("math").unwrap(),
            " Math ",
            Level::Medium,
            vec![q.clone(), q],
        )
        .unwrap();
        assert_eq!(quiz.title(), "Math");
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz.last_index(), 1);
        assert!(quiz.question(0).unwrap().is_correct(1));
    }
}
