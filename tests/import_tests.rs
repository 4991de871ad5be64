//! End-to-end import tests: board exports, trick CSVs and backup restore.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use trick_sync::db::Database;
use trick_sync::error::{ErrorCode, SyncError};
use trick_sync::import::{
    ImportOptions, import_board, import_board_files, import_csv, import_fetched_boards,
};
use trick_sync::source::Board;
use trick_sync::types::TrickRecord;

/// Helper to create a fresh in-memory database for testing.
fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

fn options() -> ImportOptions {
    ImportOptions {
        null_sentinels: vec!["INVALID".to_string(), "NULL".to_string()],
        ..ImportOptions::default()
    }
}

const MINI_RAMP_BOARD: &str = r#"{
    "id": "617a6b359c4ddb448d6dadc9",
    "name": "Mini Ramp",
    "lists": [
        {"id": "a1", "name": "1", "closed": false},
        {"id": "a2", "name": "2", "closed": false},
        {"id": "a4", "name": "4", "closed": false},
        {"id": "old", "name": "3", "closed": true},
        {"id": "arc", "name": "Archive", "closed": false}
    ],
    "cards": [
        {"name": "Rock to Fakie", "idList": "a1", "closed": false},
        {"name": "Kickflip", "idList": "a2", "closed": false},
        {"name": "Fakie Kickflip", "idList": "a4", "closed": false},
        {"name": "Axle Stall", "idList": "old", "closed": false},
        {"name": "Disaster", "idList": "arc", "closed": false},
        {"name": "Blunt", "idList": "a2", "closed": true}
    ]
}"#;

fn write_board(dir: &Path, file_name: &str, json: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn board_import_skips_archive_and_closed_lists() {
    let db = setup_db();
    let board = Board::from_json(MINI_RAMP_BOARD).unwrap();

    let summary = import_board(&db, &board, &options()).unwrap();

    assert_eq!(summary.category, "Mini Ramp");
    assert_eq!(summary.added, 2);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.skipped_list, 2);
    assert_eq!(summary.skipped_card, 1);

    let tricks = db.list_tricks("Mini Ramp").unwrap();
    let names: Vec<&str> = tricks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Rock to Fakie", "Kickflip"]);

    let kickflip = db.find_trick("Kickflip", "Mini Ramp").unwrap().unwrap();
    assert_eq!(kickflip.difficulty, Some(2));
    assert_eq!(kickflip.fakie_difficulty, Some(4));
}

#[test]
fn oversized_numeric_list_is_skipped_not_fatal() {
    let db = setup_db();
    let board = Board::from_json(
        r#"{
            "name": "Rail",
            "lists": [
                {"id": "r2", "name": "2"},
                {"id": "huge", "name": "99999999999999999999"}
            ],
            "cards": [
                {"name": "Boardslide", "idList": "r2"},
                {"name": "Lipslide", "idList": "huge"},
                {"name": "Smith", "idList": "r2"}
            ]
        }"#,
    )
    .unwrap();

    let summary = import_board(&db, &board, &options()).unwrap();

    assert_eq!(summary.added, 2);
    assert_eq!(summary.skipped_list, 1);
    assert!(db.find_trick("Smith", "Rail").unwrap().is_some());
    assert!(db.find_trick("Lipslide", "Rail").unwrap().is_none());
}

#[test]
fn board_import_takes_backup_first() {
    let db = setup_db();
    let mut existing = TrickRecord::new("Kickflip", "Mini Ramp");
    existing.difficulty = Some(9);
    db.insert_trick(&existing).unwrap();

    let board = Board::from_json(MINI_RAMP_BOARD).unwrap();
    import_board(&db, &board, &options()).unwrap();

    assert!(db.has_backup().unwrap());
    assert_eq!(
        db.find_trick("Kickflip", "Mini Ramp").unwrap().unwrap().difficulty,
        Some(2)
    );
}

#[test]
fn category_override_replaces_board_name() {
    let db = setup_db();
    let board = Board::from_json(MINI_RAMP_BOARD).unwrap();
    let options = ImportOptions {
        category: Some("Bowl".to_string()),
        ..options()
    };

    let summary = import_board(&db, &board, &options).unwrap();

    assert_eq!(summary.category, "Bowl");
    assert!(db.list_tricks("Mini Ramp").unwrap().is_empty());
    assert_eq!(db.list_tricks("Bowl").unwrap().len(), 2);
}

#[test]
fn import_files_reads_directories_and_gzip() {
    let dir = TempDir::new().unwrap();
    write_board(dir.path(), "Mini Ramp.json", MINI_RAMP_BOARD);

    let vert = r#"{
        "name": "Vert",
        "lists": [{"id": "v5", "name": "5"}],
        "cards": [{"name": "McTwist", "idList": "v5"}]
    }"#;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(vert.as_bytes()).unwrap();
    std::fs::write(dir.path().join("Vert.json.gz"), encoder.finish().unwrap()).unwrap();

    let db = setup_db();
    let summaries = import_board_files(&db, &[dir.path().to_path_buf()], &options()).unwrap();

    let categories: Vec<&str> = summaries.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(categories, vec!["Mini Ramp", "Vert"]);
    assert_eq!(
        db.find_trick("McTwist", "Vert").unwrap().unwrap().difficulty,
        Some(5)
    );
}

#[test]
fn fetched_boards_use_configured_categories() {
    let dir = TempDir::new().unwrap();
    let path = write_board(dir.path(), "Bowl.json", MINI_RAMP_BOARD);

    let db = setup_db();
    let summaries =
        import_fetched_boards(&db, &[(path, "Bowl".to_string())], &options()).unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].category, "Bowl");
    assert!(db.find_trick("Kickflip", "Bowl").unwrap().is_some());
}

#[test]
fn malformed_board_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = write_board(dir.path(), "Broken.json", "{\"lists\": [");

    let db = setup_db();
    let err = import_board_files(&db, &[path], &options()).unwrap_err();
    assert!(format!("{:#}", err).contains("Broken.json"));
}

#[test]
fn restore_undoes_an_import() {
    let db = setup_db();
    let mut kickflip = TrickRecord::new("Kickflip", "Mini Ramp");
    kickflip.difficulty = Some(9);
    db.insert_trick(&kickflip).unwrap();
    let before = db.list_tricks("Mini Ramp").unwrap();

    let board = Board::from_json(MINI_RAMP_BOARD).unwrap();
    import_board(&db, &board, &options()).unwrap();
    assert_ne!(db.list_tricks("Mini Ramp").unwrap(), before);

    let mut db = db;
    let restored = db.restore_backup().unwrap();
    assert_eq!(restored, 1);
    assert_eq!(db.list_tricks("Mini Ramp").unwrap(), before);
}

#[test]
fn restore_without_backup_fails() {
    let mut db = setup_db();
    let err = db.restore_backup().unwrap_err();
    let err = err.downcast::<SyncError>().unwrap();
    assert_eq!(err.code, ErrorCode::BackupMissing);
}

#[test]
fn csv_import_replaces_regular_tricks() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("Tricklist.csv");
    std::fs::write(
        &csv_path,
        "Name,Difficulty,Category,FakieDifficulty,SwitchDifficulty,NollieDifficulty,IsSpecialTrick\n\
         Ollie,1,Flat Ground,2,3,INVALID,0\n\
         Kickflip,3,Flat Ground,,NULL,5,false\n\
         Darkslide,10,Flat Ground,,,,1\n",
    )
    .unwrap();

    let mut db = setup_db();
    db.insert_trick(&TrickRecord::new("Old Trick", "Flat Ground"))
        .unwrap();
    let mut special = TrickRecord::new("Hippy Jump", "Flat Ground");
    special.is_special_trick = true;
    db.insert_trick(&special).unwrap();

    let summary = import_csv(&mut db, &csv_path, &options().null_sentinels).unwrap();

    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.inserted, 3);
    assert_eq!(summary.kept_special, 1);
    assert!(db.has_backup().unwrap());

    assert!(db.find_trick("Old Trick", "Flat Ground").unwrap().is_none());
    assert!(db.find_trick("Hippy Jump", "Flat Ground").unwrap().is_some());

    let ollie = db.find_trick("Ollie", "Flat Ground").unwrap().unwrap();
    assert_eq!(ollie.fakie_difficulty, Some(2));
    assert_eq!(ollie.switch_difficulty, Some(3));
    assert_eq!(ollie.nollie_difficulty, None);

    let kickflip = db.find_trick("Kickflip", "Flat Ground").unwrap().unwrap();
    assert_eq!(kickflip.fakie_difficulty, None);
    assert_eq!(kickflip.switch_difficulty, None);
    assert_eq!(kickflip.nollie_difficulty, Some(5));

    assert!(db.find_trick("Darkslide", "Flat Ground").unwrap().unwrap().is_special_trick);
}

#[test]
fn csv_with_bad_difficulty_leaves_table_untouched() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("Tricklist.csv");
    std::fs::write(
        &csv_path,
        "Name,Category,Difficulty\nOllie,Flat Ground,1\nKickflip,Flat Ground,hard\n",
    )
    .unwrap();

    let mut db = setup_db();
    db.insert_trick(&TrickRecord::new("Old Trick", "Flat Ground"))
        .unwrap();

    let err = import_csv(&mut db, &csv_path, &options().null_sentinels).unwrap_err();
    assert!(format!("{:#}", err).contains("Row 3"));
    assert!(db.find_trick("Old Trick", "Flat Ground").unwrap().is_some());
    assert!(db.find_trick("Ollie", "Flat Ground").unwrap().is_none());
}
