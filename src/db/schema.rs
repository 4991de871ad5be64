//! Schema introspection for the trick database.

use super::Database;
use anyhow::Result;
use rusqlite::params;
use serde::{Deserialize, Serialize};

/// Information about a table column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    pub primary_key: bool,
}

impl Database {
    /// Column information for a table, in declaration order.
    pub fn get_table_columns(&self, table_name: &str) -> Result<Vec<ColumnInfo>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid",
            )?;

            let columns: Vec<ColumnInfo> = stmt
                .query_map(params![table_name], |row| {
                    Ok(ColumnInfo {
                        name: row.get(0)?,
                        data_type: row.get::<_, String>(1)?.to_uppercase(),
                        nullable: row.get::<_, i32>(2)? == 0,
                        primary_key: row.get::<_, i32>(3)? > 0,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(columns)
        })
    }

    /// Table names, excluding SQLite internals and migration history.
    pub fn get_table_names(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table'
                 AND name NOT LIKE 'sqlite_%'
                 AND name NOT LIKE 'refinery_%'
                 ORDER BY name",
            )?;

            let names: Vec<String> = stmt
                .query_map([], |row| row.get(0))?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(names)
        })
    }
}
