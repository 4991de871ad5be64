//! Import runs: back up, read a source, reconcile every card.

use crate::db::Database;
use crate::error::SyncError;
use crate::reconcile::reconcile;
use crate::source::Board;
use crate::types::{CsvReloadSummary, ImportSummary};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Options shared by every board imported in one run.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Category to use instead of the board's name.
    pub category: Option<String>,
    /// Skip the backup snapshot (the caller already took one this run).
    pub skip_backup: bool,
    pub null_sentinels: Vec<String>,
}

/// Reconcile every qualifying card of a board into the store.
///
/// Cards are processed in board order and each write is committed on its
/// own; a failure part-way leaves earlier cards applied.
pub fn import_board(db: &Database, board: &Board, options: &ImportOptions) -> Result<ImportSummary> {
    let category = match options.category.as_deref() {
        Some(category) => category,
        None if !board.name.trim().is_empty() => board.name.trim(),
        None => return Err(SyncError::missing_category("board").into()),
    };

    if !options.skip_backup {
        db.backup_tricks()?;
    }

    let cards = board.incoming_cards();
    let mut summary = ImportSummary::new(category);
    summary.skipped_list = cards.skipped_list;
    summary.skipped_card = cards.skipped_card;

    for card in &cards.cards {
        let result = reconcile(db, card, category, &options.null_sentinels)
            .with_context(|| format!("Failed to reconcile card '{}'", card.name))?;
        summary.record(result.outcome);
    }

    info!(
        category = %summary.category,
        added = summary.added,
        updated = summary.updated,
        skipped_list = summary.skipped_list,
        skipped_card = summary.skipped_card,
        "Board imported"
    );

    Ok(summary)
}

/// Import board export files. The table is backed up once, before the first
/// board, so the backup reflects the state at the start of the run.
pub fn import_board_files(
    db: &Database,
    paths: &[PathBuf],
    options: &ImportOptions,
) -> Result<Vec<ImportSummary>> {
    let files = expand_board_paths(paths)?;
    if files.is_empty() {
        warn!("No board files to import");
        return Ok(Vec::new());
    }

    if !options.skip_backup {
        db.backup_tricks()?;
    }
    let per_board = ImportOptions {
        skip_backup: true,
        ..options.clone()
    };

    let mut summaries = Vec::with_capacity(files.len());
    for path in &files {
        let board = Board::from_file(path)?;
        let summary = import_board(db, &board, &per_board)
            .with_context(|| format!("Failed to import {}", path.display()))?;
        summaries.push(summary);
    }

    Ok(summaries)
}

/// Import freshly downloaded boards, each under the category it was
/// configured with. One backup is taken for the whole batch.
pub fn import_fetched_boards(
    db: &Database,
    files: &[(PathBuf, String)],
    options: &ImportOptions,
) -> Result<Vec<ImportSummary>> {
    if !options.skip_backup && !files.is_empty() {
        db.backup_tricks()?;
    }

    let mut summaries = Vec::with_capacity(files.len());
    for (path, category) in files {
        let board = Board::from_file(path)?;
        let per_board = ImportOptions {
            category: Some(category.clone()),
            skip_backup: true,
            ..options.clone()
        };
        let summary = import_board(db, &board, &per_board)
            .with_context(|| format!("Failed to import {}", path.display()))?;
        summaries.push(summary);
    }

    Ok(summaries)
}

/// Expand directories into their `.json` / `.json.gz` files (sorted);
/// plain file paths are kept as given.
pub fn expand_board_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(path)
                .with_context(|| format!("Failed to read directory {}", path.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && is_board_file(p))
                .collect();
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn is_board_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    name.ends_with(".json") || name.ends_with(".json.gz")
}

/// Reload the table from a trick CSV, keeping special tricks.
pub fn import_csv(db: &mut Database, path: &Path, null_sentinels: &[String]) -> Result<CsvReloadSummary> {
    let rows = crate::source::csv::read_tricks_csv(path, null_sentinels)?;
    db.backup_tricks()?;
    let summary = db.reload_from_rows(&rows)?;

    info!(
        path = %path.display(),
        deleted = summary.deleted,
        inserted = summary.inserted,
        kept_special = summary.kept_special,
        "Trick CSV loaded"
    );

    Ok(summary)
}
