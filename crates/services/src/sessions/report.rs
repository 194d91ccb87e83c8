use quiz_core::model::HistoryEntry;

/// Whether the completion record reached the history store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryWrite {
    Saved,
    /// Best-effort write failed; the user was still navigated to the finish screen.
    Failed(String),
}

/// Produced once when the last question is left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    pub entry: HistoryEntry,
    pub write: HistoryWrite,
}

/// Where the session went after an explicit advance or skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Next { index: usize },
    Completed(CompletionReport),
}

/// How a confirmation was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Correct,
    Incorrect { correct_index: usize },
    /// Nothing was selected and the user agreed to skip.
    Skipped,
    /// Nothing was selected and the user kept the question.
    SkipDeclined,
    /// A question already answered incorrectly was confirmed again.
    Continued,
}

/// Result of `QuizSessionController::confirm_answer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmReport {
    pub resolution: Resolution,
    /// Present when the controller moved past the question.
    pub step: Option<Step>,
}
