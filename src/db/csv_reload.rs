//! Full-table reload from CSV rows.

use super::Database;
use crate::error::SyncError;
use crate::source::csv::CsvTrickRow;
use crate::types::CsvReloadSummary;
use anyhow::Result;
use rusqlite::{params, OptionalExtension};
use std::collections::HashSet;
use tracing::warn;

impl Database {
    /// Replace every non-special trick with the given rows.
    ///
    /// Special tricks stay as they are; a CSV row that collides with one is
    /// skipped. Runs in a single transaction, so a bad row leaves the table
    /// untouched.
    pub fn reload_from_rows(&mut self, rows: &[CsvTrickRow]) -> Result<CsvReloadSummary> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let kept_special: i64 = tx.query_row(
                "SELECT COUNT(*) FROM Tricks WHERE IsSpecialTrick != 0",
                [],
                |row| row.get(0),
            )?;
            let deleted = tx.execute("DELETE FROM Tricks WHERE IsSpecialTrick = 0", [])?;

            let mut inserted = 0;
            let mut seen: HashSet<(&str, &str)> = HashSet::new();
            {
                let mut exists = tx.prepare(
                    "SELECT 1 FROM Tricks WHERE Name = ?1 AND Category = ?2",
                )?;
                let mut insert = tx.prepare(
                    "INSERT INTO Tricks (Name, Difficulty, Category, FakieDifficulty,
                                         SwitchDifficulty, NollieDifficulty, IsSpecialTrick)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                )?;

                for row in rows {
                    let trick = &row.record;
                    if !seen.insert((trick.name.as_str(), trick.category.as_str())) {
                        return Err(SyncError::malformed_row(
                            row.line,
                            format!("duplicate trick {} ({})", trick.name, trick.category),
                        )
                        .into());
                    }

                    let present: Option<i64> = exists
                        .query_row(params![trick.name, trick.category], |r| r.get(0))
                        .optional()?;
                    if present.is_some() {
                        warn!(
                            line = row.line,
                            name = %trick.name,
                            category = %trick.category,
                            "CSV row collides with a special trick, keeping the special trick"
                        );
                        continue;
                    }

                    insert
                        .execute(params![
                            trick.name,
                            trick.difficulty,
                            trick.category,
                            trick.fakie_difficulty,
                            trick.switch_difficulty,
                            trick.nollie_difficulty,
                            trick.is_special_trick,
                        ])
                        .map_err(|e| SyncError::malformed_row(row.line, e))?;
                    inserted += 1;
                }
            }

            tx.commit()?;

            Ok(CsvReloadSummary {
                deleted,
                inserted,
                kept_special: kept_special as usize,
            })
        })
    }
}
