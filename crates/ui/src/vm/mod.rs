mod catalog_vm;
mod finish_vm;
mod history_vm;
mod quiz_vm;
mod time_fmt;

pub use catalog_vm::{QuizCardVm, level_class, map_quiz_cards};
pub use finish_vm::FinishVm;
pub use history_vm::{HistoryRowVm, map_history_rows};
pub use quiz_vm::{AlternativeState, AlternativeVm, QuizVm, card_style};
