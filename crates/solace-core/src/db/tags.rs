//! Tag registry operations and tag-wide cascades

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::error::{Result, SolaceError};
use crate::tag::Tag;

impl super::Database {
    pub fn list_tags(&self) -> Result<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, color FROM tags ORDER BY name")
            .map_err(|e| SolaceError::db_operation("prepare tag list query", e))?;

        let tags = stmt
            .query_map([], |row| {
                Ok(Tag {
                    name: row.get(0)?,
                    color: row.get(1)?,
                })
            })
            .map_err(|e| SolaceError::db_operation("query tags", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| SolaceError::db_operation("read tag rows", e))?;

        Ok(tags)
    }

    /// Tags with the number of records carrying each, alphabetical
    pub fn list_tags_with_usage(&self) -> Result<Vec<(Tag, i64)>> {
        let sql = r#"
            SELECT t.name, t.color, COUNT(rt.record_id) AS uses
            FROM tags t
            LEFT JOIN record_tags rt ON rt.tag = t.name
            GROUP BY t.name, t.color
            ORDER BY t.name
        "#;

        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| SolaceError::db_operation("prepare tag usage query", e))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    Tag {
                        name: row.get(0)?,
                        color: row.get(1)?,
                    },
                    row.get::<_, i64>(2)?,
                ))
            })
            .map_err(|e| SolaceError::db_operation("query tag usage", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| SolaceError::db_operation("read tag usage rows", e))?;

        Ok(rows)
    }

    pub fn get_tag(&self, name: &str) -> Result<Option<Tag>> {
        let result = self.conn.query_row(
            "SELECT name, color FROM tags WHERE name = ?1",
            params![name],
            |row| {
                Ok(Tag {
                    name: row.get(0)?,
                    color: row.get(1)?,
                })
            },
        );

        match result {
            Ok(tag) => Ok(Some(tag)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(SolaceError::db_operation("query tag", e)),
        }
    }

    /// Create or overwrite a registry entry
    pub fn upsert_tag(&self, tag: &Tag) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO tags (name, color) VALUES (?1, ?2)",
                params![tag.name, tag.color],
            )
            .map_err(|e| SolaceError::db_operation("upsert tag", e))?;
        Ok(())
    }

    pub(crate) fn upsert_missing_tag_internal(
        conn: &Connection,
        name: &str,
        color: &str,
    ) -> Result<()> {
        conn.execute(
            "INSERT OR IGNORE INTO tags (name, color) VALUES (?1, ?2)",
            params![name, color],
        )
        .map_err(|e| SolaceError::db_operation("register tag", e))?;
        Ok(())
    }

    /// Delete a tag and strip it from every record carrying it. Stripped
    /// records get their `updated_at` bumped. Returns whether the tag existed.
    pub fn delete_tag_cascade(&self, name: &str, now: DateTime<Utc>) -> Result<bool> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| SolaceError::transaction("start", e))?;

        let removed = tx
            .execute("DELETE FROM tags WHERE name = ?1", params![name])
            .map_err(|e| SolaceError::db_operation("delete tag", e))?;
        if removed == 0 {
            return Ok(false);
        }

        tx.execute(
            "UPDATE analyses SET updated_at = ?1 WHERE id IN (SELECT record_id FROM record_tags WHERE tag = ?2)",
            params![now.to_rfc3339(), name],
        )
        .map_err(|e| SolaceError::db_operation("touch records for deleted tag", e))?;

        tx.execute("DELETE FROM record_tags WHERE tag = ?1", params![name])
            .map_err(|e| SolaceError::db_operation("remove tag from records", e))?;

        tx.commit()
            .map_err(|e| SolaceError::transaction("commit", e))?;

        Ok(true)
    }

    /// Rename a tag across the registry and every record membership. When the
    /// new name already exists the memberships merge and the renamed tag's
    /// color wins. Touched records get their `updated_at` bumped. Returns
    /// whether the old tag existed.
    pub fn rename_tag_cascade(&self, old: &str, new: &str, now: DateTime<Utc>) -> Result<bool> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| SolaceError::transaction("start", e))?;

        let color: String = match tx.query_row(
            "SELECT color FROM tags WHERE name = ?1",
            params![old],
            |r| r.get(0),
        ) {
            Ok(color) => color,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(false),
            Err(e) => return Err(SolaceError::db_operation("query tag color", e)),
        };

        tx.execute(
            "INSERT OR REPLACE INTO tags (name, color) VALUES (?1, ?2)",
            params![new, color],
        )
        .map_err(|e| SolaceError::db_operation("upsert renamed tag", e))?;

        tx.execute(
            "UPDATE analyses SET updated_at = ?1 WHERE id IN (SELECT record_id FROM record_tags WHERE tag = ?2)",
            params![now.to_rfc3339(), old],
        )
        .map_err(|e| SolaceError::db_operation("touch records for renamed tag", e))?;

        // OR IGNORE collapses memberships on records that already carry the
        // new name
        tx.execute(
            "INSERT OR IGNORE INTO record_tags (record_id, tag) SELECT record_id, ?1 FROM record_tags WHERE tag = ?2",
            params![new, old],
        )
        .map_err(|e| SolaceError::db_operation("rewrite tag memberships", e))?;

        tx.execute("DELETE FROM record_tags WHERE tag = ?1", params![old])
            .map_err(|e| SolaceError::db_operation("remove old tag memberships", e))?;

        tx.execute("DELETE FROM tags WHERE name = ?1", params![old])
            .map_err(|e| SolaceError::db_operation("delete old tag", e))?;

        tx.commit()
            .map_err(|e| SolaceError::transaction("commit", e))?;

        Ok(true)
    }
}
