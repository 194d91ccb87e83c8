use quiz_core::model::{HistoryEntry, HistoryEntryId, Level};
use storage::repository::{HistoryRepository, StorageError};
use storage::sqlite::SqliteRepository;

fn entry(id: u64, title: &str, level: Level, points: u32, questions: u32) -> HistoryEntry {
    HistoryEntry::from_persisted(HistoryEntryId::new(id), title, level, points, questions).unwrap()
}

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrip_persists_history_entry() {
    let repo = connect("memdb_history_roundtrip").await;

    let original = entry(1_700_000_000_000, "Arithmetic warm-up", Level::Hard, 2, 3);
    repo.append(&original).await.unwrap();

    let fetched = repo.get(original.id()).await.expect("fetch");
    assert_eq!(fetched, original);
}

#[tokio::test]
async fn sqlite_lists_newest_first_and_limits() {
    let repo = connect("memdb_history_list").await;

    for (id, points) in [(100_u64, 1_u32), (300, 3), (200, 2)] {
        repo.append(&entry(id, "Math", Level::Easy, points, 3))
            .await
            .unwrap();
    }

    let listed = repo.list_recent(2).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|e| e.id().value()).collect();
    assert_eq!(ids, vec![300, 200]);
}

#[tokio::test]
async fn sqlite_rejects_duplicate_ids() {
    let repo = connect("memdb_history_conflict").await;

    repo.append(&entry(7, "Math", Level::Easy, 1, 3)).await.unwrap();
    let err = repo
        .append(&entry(7, "Other", Level::Medium, 0, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict));
}

#[tokio::test]
async fn sqlite_remove_and_missing_entries() {
    let repo = connect("memdb_history_remove").await;

    repo.append(&entry(9, "Math", Level::Easy, 1, 1)).await.unwrap();
    repo.remove(HistoryEntryId::new(9)).await.unwrap();

    assert!(matches!(
        repo.get(HistoryEntryId::new(9)).await,
        Err(StorageError::NotFound)
    ));
    assert!(matches!(
        repo.remove(HistoryEntryId::new(9)).await,
        Err(StorageError::NotFound)
    ));
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = connect("memdb_history_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
    repo.append(&entry(1, "Math", Level::Easy, 0, 1)).await.unwrap();
    assert_eq!(repo.list_recent(10).await.unwrap().len(), 1);
}
