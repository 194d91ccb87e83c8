mod controller;
mod report;
mod service;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::QuizSessionController;
pub use report::{CompletionReport, ConfirmReport, HistoryWrite, Resolution, Step};
pub use service::QuizSessionService;
