//! SQLite schema for the journal database

use rusqlite::Connection;

use crate::error::{Result, SolaceError};

/// Current database schema version
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

const SCHEMA_SQL: &str = r#"
-- Analysis records
CREATE TABLE IF NOT EXISTS analyses (
    id TEXT PRIMARY KEY,
    content TEXT NOT NULL,
    summary TEXT NOT NULL,
    response TEXT NOT NULL,
    favorite INTEGER NOT NULL DEFAULT 0,
    last_viewed TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_analyses_updated ON analyses(updated_at);
CREATE INDEX IF NOT EXISTS idx_analyses_viewed ON analyses(last_viewed);
CREATE INDEX IF NOT EXISTS idx_analyses_favorite ON analyses(favorite);

-- Tag memberships (normalized)
CREATE TABLE IF NOT EXISTS record_tags (
    record_id TEXT NOT NULL REFERENCES analyses(id) ON DELETE CASCADE,
    tag TEXT NOT NULL,
    PRIMARY KEY (record_id, tag)
);
CREATE INDEX IF NOT EXISTS idx_record_tags_tag ON record_tags(tag);

-- Tag registry (name and display color)
CREATE TABLE IF NOT EXISTS tags (
    name TEXT PRIMARY KEY,
    color TEXT NOT NULL
);

-- Store metadata
CREATE TABLE IF NOT EXISTS journal_meta (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

pub fn create_schema(conn: &Connection) -> Result<()> {
    let current_version: Option<i32> = conn
        .query_row(
            "SELECT value FROM journal_meta WHERE key = 'schema_version'",
            [],
            |r| r.get::<_, String>(0).map(|s| s.parse().unwrap_or(0)),
        )
        .ok();

    match current_version {
        None => {
            conn.execute_batch(SCHEMA_SQL)
                .map_err(|e| SolaceError::db_operation("create schema", e))?;
            conn.execute(
                "INSERT INTO journal_meta (key, value) VALUES ('schema_version', ?1)",
                [&CURRENT_SCHEMA_VERSION.to_string()],
            )
            .map_err(|e| SolaceError::db_operation("record schema version", e))?;
            tracing::info!(
                "Database schema created at version {}",
                CURRENT_SCHEMA_VERSION
            );
            Ok(())
        }
        Some(v) if v == CURRENT_SCHEMA_VERSION => Ok(()),
        Some(v) if v > CURRENT_SCHEMA_VERSION => Err(SolaceError::InvalidStore {
            reason: format!(
                "database schema version {} is newer than this build supports ({})",
                v, CURRENT_SCHEMA_VERSION
            ),
        }),
        // Stepwise ALTER migrations slot in above this arm as versions grow
        Some(v) => Err(SolaceError::InvalidStore {
            reason: format!("database schema version {} has no migration path", v),
        }),
    }
}
