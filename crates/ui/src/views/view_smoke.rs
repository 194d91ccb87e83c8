use std::sync::Arc;

use quiz_core::model::{HistoryEntry, HistoryEntryId, Level};
use quiz_core::time::fixed_now;
use storage::repository::{HistoryRepository, StorageError};

use super::quiz::QuizIntent;
use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_history};

fn sample_entry() -> HistoryEntry {
    let id = HistoryEntryId::from_millis(fixed_now().timestamp_millis());
    HistoryEntry::from_persisted(id, "Arithmetic warm-up", Level::Easy, 2, 3).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_quizzes_and_levels() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Arithmetic warm-up"), "missing quiz in {html}");
    assert!(html.contains("3 questions"), "missing count in {html}");
    for label in ["Easy", "Medium", "Hard"] {
        assert!(html.contains(label), "missing {label} chip in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_entry() {
    let mut harness = setup_view_harness(ViewKind::History);
    harness
        .storage
        .history
        .append(&sample_entry())
        .await
        .expect("append entry");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Arithmetic warm-up"), "missing title in {html}");
    assert!(html.contains("2/3"), "missing score in {html}");
    assert!(html.contains("Remove"), "missing remove button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::History);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No finished quizzes yet."), "missing empty text in {html}");
}

struct FailingHistory;

#[async_trait::async_trait]
impl HistoryRepository for FailingHistory {
    async fn append(&self, _entry: &HistoryEntry) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_recent(&self, _limit: u32) -> Result<Vec<HistoryEntry>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get(&self, _id: HistoryEntryId) -> Result<HistoryEntry, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn remove(&self, _id: HistoryEntryId) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness_with_history(ViewKind::History, Arc::new(FailingHistory));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn finish_view_smoke_renders_score() {
    let mut harness = setup_view_harness(ViewKind::Finish {
        points: 2,
        total: 3,
    });
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Well done!"), "missing headline in {html}");
    assert!(
        html.contains("You got 2 out of 3 questions right"),
        "missing score in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz("math-1".to_owned()));
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Arithmetic warm-up"), "missing title in {html}");
    assert!(html.contains("What is 7 x 8?"), "missing question in {html}");
    assert!(html.contains("1/3"), "missing position in {html}");
    assert!(html.contains("Confirm"), "missing confirm in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_unknown_quiz_renders_not_found() {
    let mut harness = setup_view_harness(ViewKind::Quiz("geo-9".to_owned()));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("This quiz does not exist."), "missing error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_selection_and_answers_record_history() {
    let mut harness = setup_view_harness(ViewKind::Quiz("math-1".to_owned()));
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    harness.dispatch(QuizIntent::Select(1)).await;
    let html = harness.render();
    assert!(html.contains("alternative--checked"), "missing selection in {html}");

    harness.dispatch(QuizIntent::Confirm).await;
    let html = harness.render();
    assert!(html.contains("2/3"), "did not advance in {html}");

    for pick in [0, 2] {
        harness.dispatch(QuizIntent::Select(pick)).await;
        harness.dispatch(QuizIntent::Confirm).await;
    }

    let entries = harness.storage.history.list_recent(10).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].points(), 3);
    assert_eq!(entries[0].questions(), 3);
}
