mod history;
mod ids;
mod level;
mod quiz;
mod session;
mod settings;

pub use ids::{HistoryEntryId, ParseIdError, QuizId};
pub use level::{Level, ParseLevelError};

pub use history::{HistoryEntry, HistoryEntryError, QuizResult};
pub use quiz::{Question, QuestionError, Quiz, QuizError};
pub use session::{
    Advance, AnswerOutcome, QuizSession, QuizSessionError, SessionPhase, SessionProgress,
};
pub use settings::{IncorrectAnswerPolicy, QuizSettings, QuizSettingsDraft, QuizSettingsError};
