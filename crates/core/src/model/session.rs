use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::history::{HistoryEntryError, QuizResult};
use crate::model::quiz::{Question, Quiz};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSessionError {
    #[error("session is not active (phase: {phase})")]
    NotActive { phase: SessionPhase },

    #[error("alternative {index} is out of range for {len} alternatives")]
    InvalidAlternative { index: usize, len: usize },

    #[error("current question was already answered")]
    QuestionResolved,

    #[error(transparent)]
    Result(#[from] HistoryEntryError),
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a quiz session. `Completed` and `Aborted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Active,
    Completed,
    Aborted,
}

impl SessionPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Completed | SessionPhase::Aborted)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Loading => "loading",
            SessionPhase::Active => "active",
            SessionPhase::Completed => "completed",
            SessionPhase::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuestionStatus {
    Open,
    Resolved,
}

/// Result of confirming the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Nothing was selected; the caller decides whether to skip.
    Unanswered,
    Correct,
    Incorrect { correct_index: usize },
}

/// Result of moving past the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    Finished(QuizResult),
}

/// Snapshot of session progress for headers and progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based position of the current question.
    pub current: usize,
    pub total: usize,
    pub answered: u32,
    pub score: u32,
}

impl SessionProgress {
    /// Completed fraction in `[0, 1]`, counting the current question as reached.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.current as f32 / self.total as f32).clamp(0.0, 1.0)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at a single quiz.
///
/// Pure state machine: answering never advances on its own. Callers drive
/// `advance`/`skip` explicitly after inspecting the `AnswerOutcome`.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: Quiz,
    current: usize,
    selected: Option<usize>,
    score: u32,
    answered: u32,
    status: QuestionStatus,
    phase: SessionPhase,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    #[must_use]
    pub fn start(quiz: Quiz, started_at: DateTime<Utc>) -> Self {
        Self {
            quiz,
            current: 0,
            selected: None,
            score: 0,
            answered: 0,
            status: QuestionStatus::Open,
            phase: SessionPhase::Active,
            started_at,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        // `current` never passes the last index and a quiz is never empty.
        &self.quiz.questions()[self.current]
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current >= self.quiz.last_index()
    }

    /// True when the current question was answered and only an advance remains.
    #[must_use]
    pub fn awaiting_advance(&self) -> bool {
        self.phase == SessionPhase::Active && self.status == QuestionStatus::Resolved
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            current: self.current + 1,
            total: self.quiz.len(),
            answered: self.answered,
            score: self.score,
        }
    }

    /// Select an alternative of the current question. No other side effect.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::InvalidAlternative` for an out-of-range index,
    /// `QuestionResolved` once the question was answered, `NotActive` after the session ended.
    pub fn select_alternative(&mut self, index: usize) -> Result<(), QuizSessionError> {
        self.ensure_active()?;
        if self.status == QuestionStatus::Resolved {
            return Err(QuizSessionError::QuestionResolved);
        }
        let len = self.current_question().alternatives().len();
        if index >= len {
            return Err(QuizSessionError::InvalidAlternative { index, len });
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Grade the current selection.
    ///
    /// With no selection this returns `Unanswered` and changes nothing. Otherwise the
    /// selection is cleared and the question is resolved.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::QuestionResolved` if the question was already graded.
    pub fn confirm_answer(&mut self) -> Result<AnswerOutcome, QuizSessionError> {
        self.ensure_active()?;
        if self.status == QuestionStatus::Resolved {
            return Err(QuizSessionError::QuestionResolved);
        }
        let Some(selected) = self.selected.take() else {
            return Ok(AnswerOutcome::Unanswered);
        };

        let question = self.current_question();
        let outcome = if question.is_correct(selected) {
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect {
                correct_index: question.correct(),
            }
        };

        if outcome == AnswerOutcome::Correct {
            self.score = self.score.saturating_add(1);
        }
        self.answered = self.answered.saturating_add(1);
        self.status = QuestionStatus::Resolved;
        Ok(outcome)
    }

    /// Move past the current question, finishing the session on the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::NotActive` if the session already ended.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Advance, QuizSessionError> {
        self.ensure_active()?;

        if self.is_last_question() {
            let questions = u32::try_from(self.quiz.len()).map_err(|_| {
                HistoryEntryError::TooManyQuestions {
                    len: self.quiz.len(),
                }
            })?;
            self.selected = None;
            self.phase = SessionPhase::Completed;
            self.completed_at = Some(now);
            return Ok(Advance::Finished(QuizResult {
                quiz_title: self.quiz.title().to_owned(),
                level: self.quiz.level(),
                points: self.score,
                questions,
                completed_at: now,
            }));
        }

        self.current += 1;
        self.selected = None;
        self.status = QuestionStatus::Open;
        Ok(Advance::Next {
            index: self.current,
        })
    }

    /// Skip the current question regardless of selection. Score is untouched.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::NotActive` if the session already ended.
    pub fn skip(&mut self, now: DateTime<Utc>) -> Result<Advance, QuizSessionError> {
        self.advance(now)
    }

    /// Terminate without producing a result.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::NotActive` if the session already ended.
    pub fn abort(&mut self) -> Result<(), QuizSessionError> {
        self.ensure_active()?;
        self.selected = None;
        self.phase = SessionPhase::Aborted;
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), QuizSessionError> {
        if self.phase == SessionPhase::Active {
            Ok(())
        } else {
            Err(QuizSessionError::NotActive { phase: self.phase })
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
