use std::fmt;
use std::sync::Arc;

use quiz_core::gesture::{CardPose, DragEvent, SwipeOutcome, SwipeTracker};
use quiz_core::model::{
    Advance, AnswerOutcome, HistoryEntry, IncorrectAnswerPolicy, QuizId, QuizResult, QuizSession,
    QuizSessionError, QuizSettings, SessionPhase,
};
use storage::bank::QuestionBank;
use storage::repository::HistoryRepository;

use super::report::{CompletionReport, ConfirmReport, HistoryWrite, Resolution, Step};
use crate::Clock;
use crate::capabilities::{ConfirmPrompt, FeedbackSignal, NavigationTarget, SessionCapabilities};
use crate::error::SessionError;

/// Drives one quiz session for one screen.
///
/// Owns the session state and calls out to the injected capabilities for dialogs,
/// feedback and navigation. Answering never advances implicitly: every move to the
/// next question goes through `advance`/`skip`.
pub struct QuizSessionController {
    clock: Clock,
    settings: QuizSettings,
    bank: Arc<dyn QuestionBank>,
    history: Arc<dyn HistoryRepository>,
    capabilities: SessionCapabilities,
    session: Option<QuizSession>,
    swipe: SwipeTracker,
    completion: Option<CompletionReport>,
}

impl QuizSessionController {
    #[must_use]
    pub fn new(
        clock: Clock,
        settings: QuizSettings,
        bank: Arc<dyn QuestionBank>,
        history: Arc<dyn HistoryRepository>,
        capabilities: SessionCapabilities,
    ) -> Self {
        Self {
            clock,
            settings,
            bank,
            history,
            capabilities,
            session: None,
            swipe: SwipeTracker::new(settings.swipe()),
            completion: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session
            .as_ref()
            .map_or(SessionPhase::Loading, QuizSession::phase)
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn card_pose(&self) -> CardPose {
        self.swipe.pose()
    }

    #[must_use]
    pub fn last_completion(&self) -> Option<&CompletionReport> {
        self.completion.as_ref()
    }

    /// Look up the quiz and start the session at the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` if the bank has no such quiz and
    /// `SessionError::AlreadyStarted` if a quiz was loaded before.
    pub fn load_quiz(&mut self, id: &QuizId) -> Result<&QuizSession, SessionError> {
        if self.session.is_some() {
            return Err(SessionError::AlreadyStarted);
        }
        let Some(quiz) = self.bank.get_quiz_by_id(id) else {
            tracing::warn!(quiz_id = %id, "quiz not found");
            return Err(SessionError::NotFound(id.clone()));
        };

        tracing::info!(quiz_id = %id, questions = quiz.len(), "quiz session started");
        self.swipe.reset();
        Ok(self.session.insert(QuizSession::start(quiz, self.clock.now())))
    }

    /// # Errors
    ///
    /// Propagates state errors (out-of-range index, resolved question, ended session).
    pub fn select_alternative(&mut self, index: usize) -> Result<(), SessionError> {
        self.session_mut()?.select_alternative(index)?;
        Ok(())
    }

    /// Confirm the current selection and apply the resulting transition.
    ///
    /// - no selection: asks to skip,
    /// - correct: advances,
    /// - incorrect: plays the shake feedback, then follows the incorrect-answer policy,
    /// - already answered: advances.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if no quiz is loaded or the session already ended.
    pub async fn confirm_answer(&mut self) -> Result<ConfirmReport, SessionError> {
        if self.session_mut()?.awaiting_advance() {
            let step = self.advance().await?;
            return Ok(ConfirmReport {
                resolution: Resolution::Continued,
                step: Some(step),
            });
        }

        match self.session_mut()?.confirm_answer()? {
            AnswerOutcome::Unanswered => {
                let step = self.request_skip().await?;
                let resolution = if step.is_some() {
                    Resolution::Skipped
                } else {
                    Resolution::SkipDeclined
                };
                Ok(ConfirmReport { resolution, step })
            }
            AnswerOutcome::Correct => {
                let step = self.advance().await?;
                Ok(ConfirmReport {
                    resolution: Resolution::Correct,
                    step: Some(step),
                })
            }
            AnswerOutcome::Incorrect { correct_index } => {
                self.capabilities
                    .feedback
                    .play(FeedbackSignal::Shake)
                    .await;
                let step = match self.settings.incorrect_policy() {
                    IncorrectAnswerPolicy::AdvanceAfterFeedback => Some(self.advance().await?),
                    IncorrectAnswerPolicy::RequireSkip => None,
                };
                Ok(ConfirmReport {
                    resolution: Resolution::Incorrect { correct_index },
                    step,
                })
            }
        }
    }

    /// Ask the user whether to skip; skips on acceptance.
    ///
    /// Returns `None` when the user keeps the question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if no active session exists.
    pub async fn request_skip(&mut self) -> Result<Option<Step>, SessionError> {
        self.ensure_active()?;
        let prompt = ConfirmPrompt::skip_question();
        let choice = self.capabilities.confirmer.confirm(&prompt).await;
        if !prompt.is_accepted(choice) {
            tracing::debug!("skip declined");
            return Ok(None);
        }
        self.skip().await.map(Some)
    }

    /// Move on without touching the score.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if no active session exists.
    pub async fn skip(&mut self) -> Result<Step, SessionError> {
        let now = self.clock.now();
        let advance = self.session_mut()?.skip(now)?;
        self.finish_step(advance).await
    }

    /// Move to the next question, or finish and record history on the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if no active session exists.
    pub async fn advance(&mut self) -> Result<Step, SessionError> {
        let now = self.clock.now();
        let advance = self.session_mut()?.advance(now)?;
        self.finish_step(advance).await
    }

    /// End the session without recording history and leave the quiz screen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if no active session exists.
    pub fn abort(&mut self) -> Result<(), SessionError> {
        self.session_mut()?.abort()?;
        self.swipe.reset();
        tracing::info!("quiz session aborted");
        self.capabilities.navigator.go_to(NavigationTarget::Home);
        Ok(())
    }

    /// Ask the user whether to stop; aborts on acceptance. Returns whether it stopped.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if no active session exists.
    pub async fn request_stop(&mut self) -> Result<bool, SessionError> {
        self.ensure_active()?;
        let prompt = ConfirmPrompt::stop_quiz();
        let choice = self.capabilities.confirmer.confirm(&prompt).await;
        if !prompt.is_accepted(choice) {
            return Ok(false);
        }
        self.abort()?;
        Ok(true)
    }

    /// Feed a drag report from the gesture runtime. A release past the skip
    /// threshold asks for skip confirmation.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if no active session exists.
    pub async fn handle_drag(&mut self, event: DragEvent) -> Result<Option<Step>, SessionError> {
        self.ensure_active()?;
        match self.swipe.handle(event) {
            Some(SwipeOutcome::SkipRequested) => self.request_skip().await,
            Some(SwipeOutcome::SnapBack) | None => Ok(None),
        }
    }

    fn session_mut(&mut self) -> Result<&mut QuizSession, SessionError> {
        self.session.as_mut().ok_or(SessionError::NotLoaded)
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        match self.phase() {
            SessionPhase::Active => Ok(()),
            SessionPhase::Loading => Err(SessionError::NotLoaded),
            phase => Err(QuizSessionError::NotActive { phase }.into()),
        }
    }

    async fn finish_step(&mut self, advance: Advance) -> Result<Step, SessionError> {
        self.swipe.reset();
        match advance {
            Advance::Next { index } => Ok(Step::Next { index }),
            Advance::Finished(result) => {
                let report = self.record_completion(&result).await?;
                Ok(Step::Completed(report))
            }
        }
    }

    async fn record_completion(
        &mut self,
        result: &QuizResult,
    ) -> Result<CompletionReport, SessionError> {
        let entry = HistoryEntry::from_result(result)?;

        let write = match self.history.append(&entry).await {
            Ok(()) => HistoryWrite::Saved,
            Err(err) => {
                tracing::warn!(error = %err, entry_id = %entry.id(), "failed to record quiz history");
                HistoryWrite::Failed(err.to_string())
            }
        };

        tracing::info!(
            quiz = entry.quiz_title(),
            points = entry.points(),
            questions = entry.questions(),
            "quiz completed"
        );
        self.capabilities.navigator.go_to(NavigationTarget::Finish {
            points: entry.points(),
            total: entry.questions(),
        });

        let report = CompletionReport { entry, write };
        self.completion = Some(report.clone());
        Ok(report)
    }
}

impl fmt::Debug for QuizSessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSessionController")
            .field("settings", &self.settings)
            .field("phase", &self.phase())
            .field("session", &self.session)
            .field("completion", &self.completion)
            .finish_non_exhaustive()
    }
}
