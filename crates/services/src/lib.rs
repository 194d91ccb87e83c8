#![forbid(unsafe_code)]

pub mod app_services;
pub mod capabilities;
pub mod catalog_service;
pub mod error;
pub mod history_service;
pub mod sessions;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use capabilities::{
    ConfirmOption, ConfirmPrompt, ConfirmRole, Confirmer, FeedbackSignal, FeedbackSink,
    NavigationTarget, Navigator, SessionCapabilities,
};
pub use catalog_service::{QuizCatalogService, QuizListItem};
pub use error::{AppServicesError, CatalogError, HistoryServiceError, SessionError};
pub use history_service::{HistoryListItem, HistoryService};
pub use sessions::{
    CompletionReport, ConfirmReport, HistoryWrite, QuizSessionController, QuizSessionService,
    Resolution, Step,
};
