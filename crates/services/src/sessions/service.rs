use std::sync::Arc;

use quiz_core::model::QuizSettings;
use storage::bank::QuestionBank;
use storage::repository::HistoryRepository;

use super::controller::QuizSessionController;
use crate::Clock;
use crate::capabilities::SessionCapabilities;

/// Hands out session controllers wired to the shared bank and history store.
#[derive(Clone)]
pub struct QuizSessionService {
    clock: Clock,
    settings: QuizSettings,
    bank: Arc<dyn QuestionBank>,
    history: Arc<dyn HistoryRepository>,
}

impl QuizSessionService {
    #[must_use]
    pub fn new(
        clock: Clock,
        settings: QuizSettings,
        bank: Arc<dyn QuestionBank>,
        history: Arc<dyn HistoryRepository>,
    ) -> Self {
        Self {
            clock,
            settings,
            bank,
            history,
        }
    }

    /// A fresh controller in the `Loading` phase.
    #[must_use]
    pub fn controller(&self, capabilities: SessionCapabilities) -> QuizSessionController {
        QuizSessionController::new(
            self.clock,
            self.settings,
            Arc::clone(&self.bank),
            Arc::clone(&self.history),
            capabilities,
        )
    }
}
