use quiz_core::model::Level;
use services::QuizListItem;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub id: String,
    pub title: String,
    pub level: Level,
    pub level_class: &'static str,
    pub questions_label: String,
}

impl From<&QuizListItem> for QuizCardVm {
    fn from(item: &QuizListItem) -> Self {
        let questions_label = match item.question_count {
            1 => "1 question".to_owned(),
            n => format!("{n} questions"),
        };
        Self {
            id: item.id.as_str().to_owned(),
            title: item.title.clone(),
            level: item.level,
            level_class: level_class(item.level),
            questions_label,
        }
    }
}

#[must_use]
pub fn level_class(level: Level) -> &'static str {
    match level {
        Level::Easy => "level level--easy",
        Level::Medium => "level level--medium",
        Level::Hard => "level level--hard",
    }
}

#[must_use]
pub fn map_quiz_cards(items: &[QuizListItem]) -> Vec<QuizCardVm> {
    items.iter().map(QuizCardVm::from).collect()
}
