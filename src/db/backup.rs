//! Single-generation backup of the trick table.

use super::{Database, BACKUP_TABLE};
use crate::error::SyncError;
use anyhow::Result;
use tracing::info;

impl Database {
    /// Copy the whole trick table into `Tricks_Backup`, replacing any
    /// previous backup. Returns the number of rows copied.
    pub fn backup_tricks(&self) -> Result<usize> {
        self.with_conn(|conn| {
            conn.execute_batch(
                "DROP TABLE IF EXISTS Tricks_Backup;
                 CREATE TABLE Tricks_Backup AS SELECT * FROM Tricks;",
            )?;
            let rows: i64 =
                conn.query_row("SELECT COUNT(*) FROM Tricks_Backup", [], |row| row.get(0))?;
            info!(table = BACKUP_TABLE, rows, "Trick table backed up");
            Ok(rows as usize)
        })
    }

    /// Whether a backup table is present.
    pub fn has_backup(&self) -> Result<bool> {
        Ok(self
            .get_table_names()?
            .iter()
            .any(|name| name == BACKUP_TABLE))
    }

    /// Replace the trick table's contents with the backup.
    ///
    /// The backup itself is left in place so a restore can be repeated.
    pub fn restore_backup(&mut self) -> Result<usize> {
        if !self.has_backup()? {
            return Err(SyncError::backup_missing().into());
        }

        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM Tricks", [])?;
            let restored = tx.execute(
                "INSERT INTO Tricks (Name, Difficulty, Category, FakieDifficulty,
                                     SwitchDifficulty, NollieDifficulty, IsSpecialTrick)
                 SELECT Name, Difficulty, Category, FakieDifficulty,
                        SwitchDifficulty, NollieDifficulty, IsSpecialTrick
                 FROM Tricks_Backup",
                [],
            )?;
            tx.commit()?;
            info!(rows = restored, "Trick table restored from backup");
            Ok(restored)
        })
    }
}
