#![cfg(feature = "sqlite")]

use capacity_tool::{
    CapacityDataset, DatasetStore, SqliteDatasetStore, rows_from_table, table_from_rows,
};
use chrono::NaiveDate;
use tempfile::tempdir;

fn sample_dataset() -> CapacityDataset {
    let roster = table_from_rows(
        &["Department".to_string(), "Name".to_string()],
        &[
            vec!["Engineering".to_string(), "Smith, John".to_string()],
            vec!["Product".to_string(), "Wilson, Lisa".to_string()],
        ],
    )
    .unwrap();
    let projects = table_from_rows(
        &[
            "Initiative".to_string(),
            "Planned Start Date".to_string(),
            "Planned End Quarter".to_string(),
            "Duration (Mth)".to_string(),
            "Project Manager".to_string(),
            "Project Manager Hours".to_string(),
        ],
        &[vec![
            "CRM Rollout".to_string(),
            "1/1/2026".to_string(),
            "2026, Q4".to_string(),
            "12".to_string(),
            "Smith, John".to_string(),
            "600".to_string(),
        ]],
    )
    .unwrap();
    CapacityDataset::with_tables(roster, projects)
}

#[test]
fn empty_store_loads_nothing() {
    let dir = tempdir().unwrap();
    let store = SqliteDatasetStore::new(dir.path().join("capacity.db")).unwrap();
    assert!(store.load_dataset().unwrap().is_none());
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("capacity.db");
    let dataset = sample_dataset();

    let store = SqliteDatasetStore::new(&path).unwrap();
    store.save_dataset(&dataset).unwrap();

    // Reopen the file to prove the data is on disk, not in memory.
    let reopened = SqliteDatasetStore::new(&path).unwrap();
    let loaded = reopened.load_dataset().unwrap().expect("dataset stored");

    assert_eq!(
        rows_from_table(dataset.roster()).unwrap(),
        rows_from_table(loaded.roster()).unwrap()
    );
    assert_eq!(
        rows_from_table(dataset.projects()).unwrap(),
        rows_from_table(loaded.projects()).unwrap()
    );

    let as_of = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
    assert_eq!(dataset.report(as_of), loaded.report(as_of));
}

#[test]
fn saving_twice_overwrites_the_previous_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("capacity.db");
    let store = SqliteDatasetStore::new(&path).unwrap();

    store.save_dataset(&sample_dataset()).unwrap();
    store.save_dataset(&CapacityDataset::new()).unwrap();

    let loaded = store.load_dataset().unwrap().expect("dataset stored");
    assert_eq!(loaded.roster().height(), 0);
    assert_eq!(loaded.projects().height(), 0);
}
