//! Database layer for the trick store.

pub mod backup;
pub mod csv_reload;
pub mod schema;
pub mod tricks;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Name of the live trick table.
pub const TRICKS_TABLE: &str = "Tricks";

/// Name of the single-generation backup table.
pub const BACKUP_TABLE: &str = "Tricks_Backup";

/// Store handle wrapping a SQLite connection.
///
/// One handle is opened per command run and the connection is released
/// when the handle is dropped or [`Database::close`] is called.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;

        conn.execute_batch("PRAGMA busy_timeout=5000;")?;

        let mut db = Self { conn };
        db.run_migrations()?;

        debug!(path = %path.display(), "Database opened");
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        let mut db = Self { conn };
        db.run_migrations()?;

        Ok(db)
    }

    /// Run database migrations.
    fn run_migrations(&mut self) -> Result<()> {
        embedded::migrations::runner()
            .run(&mut self.conn)
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Execute a function with access to the connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        f(&self.conn)
    }

    /// Execute a function with mutable access to the connection (for transactions).
    pub fn with_conn_mut<F, T>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        f(&mut self.conn)
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, err)| anyhow::Error::new(err).context("Failed to close database"))
    }
}
