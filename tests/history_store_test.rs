//! Integration tests for the file-backed history store.

use proptest::prelude::*;
use tempfile::tempdir;

use crucible::domain::models::{AgentRole, TaskRecord};
use crucible::infrastructure::history::HistoryStore;

fn completed_record(task: &str) -> TaskRecord {
    let mut record = TaskRecord::new(task);
    for role in AgentRole::ALL {
        record.set_artifact(role, format!("{role} output for {task}"));
    }
    record.set_completion_time(3.14159);
    record
}

#[test]
fn test_reload_preserves_records_exactly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");

    let mut store = HistoryStore::open(&path);
    let records = vec![
        completed_record("first"),
        completed_record("second"),
        completed_record("third"),
    ];
    for record in &records {
        store.append(record.clone()).unwrap();
    }

    let reloaded = HistoryStore::open(&path);
    assert_eq!(reloaded.records(), records.as_slice());
}

#[test]
fn test_save_of_loaded_history_is_stable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");

    let mut store = HistoryStore::open(&path);
    store.append(completed_record("stable")).unwrap();
    let first_pass = std::fs::read_to_string(&path).unwrap();

    // Loading and saving again must not change the bytes on disk.
    let reloaded = HistoryStore::open(&path);
    reloaded.save().unwrap();
    let second_pass = std::fs::read_to_string(&path).unwrap();
    assert_eq!(first_pass, second_pass);
}

#[test]
fn test_clear_empties_the_file_for_future_opens() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");

    let mut store = HistoryStore::open(&path);
    store.append(completed_record("a")).unwrap();
    store.append(completed_record("b")).unwrap();
    store.clear().unwrap();

    assert!(store.is_empty());
    let reloaded = HistoryStore::open(&path);
    assert!(reloaded.is_empty());
    // The file is a valid empty array, not absent.
    assert!(path.exists());
}

#[test]
fn test_unreadable_file_falls_back_to_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "\"a string, not an array\"").unwrap();

    let store = HistoryStore::open(&path);
    assert!(store.is_empty());
}

#[test]
fn test_find_after_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");

    let record = completed_record("needle");
    let id = record.id.clone();
    HistoryStore::open(&path).append(record).unwrap();

    let reloaded = HistoryStore::open(&path);
    assert_eq!(reloaded.find(&id).unwrap().task, "needle");
    assert!(reloaded.find("00000000").is_none());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any task text and stage artifacts survive a save/load cycle intact.
    #[test]
    fn prop_round_trip_preserves_arbitrary_text(
        task in ".{0,120}",
        artifacts in prop::collection::vec(".{0,200}", 5),
    ) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut record = TaskRecord::new(task);
        for (role, text) in AgentRole::ALL.iter().zip(&artifacts) {
            record.set_artifact(*role, text.clone());
        }

        let mut store = HistoryStore::open(&path);
        store.append(record.clone()).unwrap();

        let reloaded = HistoryStore::open(&path);
        prop_assert_eq!(reloaded.len(), 1);
        prop_assert_eq!(&reloaded.records()[0], &record);
    }
}
