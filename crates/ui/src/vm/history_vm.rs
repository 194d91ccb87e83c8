use services::HistoryListItem;

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRowVm {
    pub id: u64,
    pub title: String,
    pub level_label: &'static str,
    pub score_label: String,
    pub recorded_at_str: String,
}

impl From<&HistoryListItem> for HistoryRowVm {
    fn from(item: &HistoryListItem) -> Self {
        Self {
            id: item.id.value(),
            title: item.quiz_title.clone(),
            level_label: item.level.label(),
            score_label: format!("{}/{}", item.points, item.questions),
            recorded_at_str: item
                .recorded_at
                .map_or_else(|| "-".to_owned(), format_datetime),
        }
    }
}

#[must_use]
pub fn map_history_rows(items: &[HistoryListItem]) -> Vec<HistoryRowVm> {
    items.iter().map(HistoryRowVm::from).collect()
}
