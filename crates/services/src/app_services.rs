use std::sync::Arc;

use quiz_core::model::QuizSettings;
use storage::bank::{QuestionBank, StaticQuestionBank};
use storage::repository::Storage;

use crate::Clock;
use crate::catalog_service::QuizCatalogService;
use crate::error::AppServicesError;
use crate::history_service::HistoryService;
use crate::sessions::QuizSessionService;

/// Assembles app-facing services over one bank and one history store.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<QuizCatalogService>,
    history: Arc<HistoryService>,
    quiz_sessions: Arc<QuizSessionService>,
}

impl AppServices {
    /// Build services backed by `SQLite` history and the bundled question bank.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage or the bank cannot be initialized.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        settings: QuizSettings,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let bank: Arc<dyn QuestionBank> = Arc::new(StaticQuestionBank::builtin()?);
        Ok(Self::from_parts(clock, settings, bank, &storage))
    }

    /// Build services with in-memory history and the bundled question bank.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Bank` if the bundled bank is malformed.
    pub fn in_memory(clock: Clock, settings: QuizSettings) -> Result<Self, AppServicesError> {
        let bank: Arc<dyn QuestionBank> = Arc::new(StaticQuestionBank::builtin()?);
        Ok(Self::from_parts(clock, settings, bank, &Storage::in_memory()))
    }

    #[must_use]
    pub fn from_parts(
        clock: Clock,
        settings: QuizSettings,
        bank: Arc<dyn QuestionBank>,
        storage: &Storage,
    ) -> Self {
        let catalog = Arc::new(QuizCatalogService::new(Arc::clone(&bank)));
        let history = Arc::new(HistoryService::new(Arc::clone(&storage.history)));
        let quiz_sessions = Arc::new(QuizSessionService::new(
            clock,
            settings,
            bank,
            Arc::clone(&storage.history),
        ));

        Self {
            catalog,
            history,
            quiz_sessions,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<QuizCatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    #[must_use]
    pub fn quiz_sessions(&self) -> Arc<QuizSessionService> {
        Arc::clone(&self.quiz_sessions)
    }
}
