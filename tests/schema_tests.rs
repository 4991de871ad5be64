//! Tests for the trick table layout.

use trick_sync::db::{BACKUP_TABLE, Database, TRICKS_TABLE};

/// Helper to create a fresh in-memory database for testing.
fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

#[test]
fn tricks_table_has_expected_column_order() {
    let db = setup_db();

    let columns = db.get_table_columns(TRICKS_TABLE).unwrap();
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Name",
            "Difficulty",
            "Category",
            "FakieDifficulty",
            "SwitchDifficulty",
            "NollieDifficulty",
            "IsSpecialTrick",
        ]
    );
}

#[test]
fn name_and_category_form_the_key() {
    let db = setup_db();

    let columns = db.get_table_columns(TRICKS_TABLE).unwrap();
    let key: Vec<&str> = columns
        .iter()
        .filter(|c| c.primary_key)
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(key, vec!["Name", "Category"]);

    let difficulty = columns.iter().find(|c| c.name == "Difficulty").unwrap();
    assert_eq!(difficulty.data_type, "INTEGER");
    assert!(difficulty.nullable);
}

#[test]
fn backup_table_only_exists_after_backup() {
    let db = setup_db();

    assert_eq!(db.get_table_names().unwrap(), vec![TRICKS_TABLE.to_string()]);
    assert!(!db.has_backup().unwrap());

    db.backup_tricks().unwrap();

    assert!(db.has_backup().unwrap());
    let columns = db.get_table_columns(BACKUP_TABLE).unwrap();
    assert_eq!(columns.len(), 7);
}

#[test]
fn reopening_a_file_database_keeps_data() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("Database.db");

    let db = Database::open(&path).unwrap();
    db.insert_trick(&trick_sync::types::TrickRecord::new("Ollie", "Vert"))
        .unwrap();
    db.close().unwrap();

    let db = Database::open(&path).unwrap();
    assert_eq!(db.count_tricks().unwrap(), 1);
}

#[test]
fn listing_an_unknown_category_is_an_error() {
    let db = setup_db();
    db.insert_trick(&trick_sync::types::TrickRecord::new("McTwist", "Vert"))
        .unwrap();

    let err = db.require_category_tricks("Bowl").unwrap_err();
    let err = err.downcast::<trick_sync::error::SyncError>().unwrap();
    assert_eq!(err.code, trick_sync::error::ErrorCode::UnknownCategory);
}
