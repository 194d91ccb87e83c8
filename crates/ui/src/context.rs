use std::sync::Arc;

use services::{AppServices, HistoryService, QuizCatalogService, QuizSessionService};

pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<QuizCatalogService>;
    fn history(&self) -> Arc<HistoryService>;
    fn quiz_sessions(&self) -> Arc<QuizSessionService>;
}

impl UiApp for AppServices {
    fn catalog(&self) -> Arc<QuizCatalogService> {
        AppServices::catalog(self)
    }

    fn history(&self) -> Arc<HistoryService> {
        AppServices::history(self)
    }

    fn quiz_sessions(&self) -> Arc<QuizSessionService> {
        AppServices::quiz_sessions(self)
    }
}

/// Services shared by every screen, provided once at the root.
#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<QuizCatalogService>,
    history: Arc<HistoryService>,
    quiz_sessions: Arc<QuizSessionService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            history: app.history(),
            quiz_sessions: app.quiz_sessions(),
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

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
