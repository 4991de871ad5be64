//! Trick row lookups and writes.

use super::Database;
use crate::error::SyncError;
use crate::types::{StanceColumn, TrickRecord};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};

/// Columns in table order; `parse_trick_row` reads them positionally.
pub(crate) const TRICK_COLUMNS: &str = "Name, Difficulty, Category, FakieDifficulty, \
     SwitchDifficulty, NollieDifficulty, IsSpecialTrick";

/// Decode a row selected with [`TRICK_COLUMNS`].
pub(crate) fn parse_trick_row(row: &Row) -> rusqlite::Result<TrickRecord> {
    Ok(TrickRecord {
        name: row.get(0)?,
        difficulty: row.get(1)?,
        category: row.get(2)?,
        fakie_difficulty: row.get(3)?,
        switch_difficulty: row.get(4)?,
        nollie_difficulty: row.get(5)?,
        is_special_trick: row.get::<_, Option<i64>>(6)?.unwrap_or(0) != 0,
    })
}

impl Database {
    /// Point lookup by `(name, category)`.
    pub fn find_trick(&self, name: &str, category: &str) -> Result<Option<TrickRecord>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {} FROM Tricks WHERE Name = ?1 AND Category = ?2",
                TRICK_COLUMNS
            );
            let record = conn
                .query_row(&sql, params![name, category], parse_trick_row)
                .optional()?;
            Ok(record)
        })
    }

    /// Insert a new trick. The caller guarantees the key is absent.
    pub fn insert_trick(&self, record: &TrickRecord) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO Tricks (Name, Difficulty, Category, FakieDifficulty,
                                     SwitchDifficulty, NollieDifficulty, IsSpecialTrick)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.name,
                    record.difficulty,
                    record.category,
                    record.fakie_difficulty,
                    record.switch_difficulty,
                    record.nollie_difficulty,
                    record.is_special_trick,
                ],
            )?;
            Ok(())
        })
    }

    /// Set a single difficulty column on an existing trick.
    pub fn set_difficulty(
        &self,
        name: &str,
        category: &str,
        column: StanceColumn,
        value: Option<i64>,
    ) -> Result<()> {
        self.with_conn(|conn| {
            let sql = format!(
                "UPDATE Tricks SET {} = ?1 WHERE Name = ?2 AND Category = ?3",
                column.column_name()
            );
            let changed = conn.execute(&sql, params![value, name, category])?;
            if changed == 0 {
                return Err(SyncError::trick_not_found(name, category).into());
            }
            Ok(())
        })
    }

    /// All tricks in a category, in table order.
    pub fn list_tricks(&self, category: &str) -> Result<Vec<TrickRecord>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {} FROM Tricks WHERE Category = ?1 ORDER BY rowid",
                TRICK_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let tricks = stmt
                .query_map(params![category], parse_trick_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tricks)
        })
    }

    /// Tricks in a category that must exist; an empty category is an
    /// `UnknownCategory` error naming the categories that do.
    pub fn require_category_tricks(&self, category: &str) -> Result<Vec<TrickRecord>> {
        let tricks = self.list_tricks(category)?;
        if tricks.is_empty() {
            let known = self.list_categories()?;
            return Err(SyncError::unknown_category(category, &known).into());
        }
        Ok(tricks)
    }

    /// Distinct categories present in the table.
    pub fn list_categories(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT DISTINCT Category FROM Tricks ORDER BY Category")?;
            let categories = stmt
                .query_map([], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            Ok(categories)
        })
    }

    /// Total number of rows in the trick table.
    pub fn count_tricks(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM Tricks", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }
}
