//! SQLite persistence for the journal store

mod records;
mod schema;
mod tags;

use std::path::Path;

use rusqlite::Connection;

use crate::error::{Result, SolaceError};

pub use schema::CURRENT_SCHEMA_VERSION;

/// Database file name inside the store directory
pub const DB_FILE: &str = "journal.db";

/// SQLite database backing one journal store
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database file inside the store directory
    pub fn open(store_dir: &Path) -> Result<Self> {
        let db_path = store_dir.join(DB_FILE);

        let conn = Connection::open(&db_path).map_err(|e| {
            SolaceError::Other(format!(
                "failed to open database at {}: {}",
                db_path.display(),
                e
            ))
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| SolaceError::Other(format!("failed to enable WAL mode: {}", e)))?;

        schema::create_schema(&conn)?;

        Ok(Database { conn })
    }

    pub fn record_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM analyses", [], |r| r.get(0))
            .map_err(|e| SolaceError::db_operation("count records", e))
    }

    pub fn favorite_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM analyses WHERE favorite = 1", [], |r| {
                r.get(0)
            })
            .map_err(|e| SolaceError::db_operation("count favorites", e))
    }

    pub fn tag_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM tags", [], |r| r.get(0))
            .map_err(|e| SolaceError::db_operation("count tags", e))
    }

    pub fn schema_version(&self) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT value FROM journal_meta WHERE key = 'schema_version'",
                [],
                |r| {
                    let s: String = r.get(0)?;
                    Ok(s.parse().unwrap_or(0))
                },
            )
            .map_err(|e| SolaceError::db_operation("get schema version", e))
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Checkpoint WAL so rapid open/close sequences see committed data
        let _ = self.conn.pragma_update(None, "wal_checkpoint", "TRUNCATE");
    }
}

#[cfg(test)]
mod tests;
