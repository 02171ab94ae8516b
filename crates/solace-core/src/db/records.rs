//! Record reads and writes against the journal database

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::error::{Result, SolaceError};
use crate::record::AnalysisRecord;

const RECORD_COLUMNS: &str =
    "id, content, summary, response, favorite, last_viewed, created_at, updated_at";

fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SolaceError::field_extraction(field, e))
}

fn load_tags(conn: &Connection, record_id: &str) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT tag FROM record_tags WHERE record_id = ?1 ORDER BY tag")
        .map_err(|e| SolaceError::db_operation("prepare tag query", e))?;

    let tags = stmt
        .query_map(params![record_id], |row| row.get::<_, String>(0))
        .map_err(|e| SolaceError::db_operation("query record tags", e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| SolaceError::db_operation("read record tag rows", e))?;

    Ok(tags)
}

fn record_from_row(conn: &Connection, row: &rusqlite::Row) -> Result<AnalysisRecord> {
    let id: String = row
        .get(0)
        .map_err(|e| SolaceError::field_extraction("id", e))?;
    let content: String = row
        .get(1)
        .map_err(|e| SolaceError::field_extraction("content", e))?;
    let summary: String = row
        .get(2)
        .map_err(|e| SolaceError::field_extraction("summary", e))?;
    let response_json: String = row
        .get(3)
        .map_err(|e| SolaceError::field_extraction("response", e))?;
    let favorite: bool = row
        .get(4)
        .map_err(|e| SolaceError::field_extraction("favorite", e))?;
    let last_viewed: String = row
        .get(5)
        .map_err(|e| SolaceError::field_extraction("last_viewed", e))?;
    let created_at: String = row
        .get(6)
        .map_err(|e| SolaceError::field_extraction("created_at", e))?;
    let updated_at: String = row
        .get(7)
        .map_err(|e| SolaceError::field_extraction("updated_at", e))?;

    let response = serde_json::from_str(&response_json).map_err(|e| SolaceError::InvalidStore {
        reason: format!("corrupt analysis payload for record {}: {}", id, e),
    })?;
    let tags = load_tags(conn, &id)?;

    Ok(AnalysisRecord {
        last_viewed: parse_datetime(&last_viewed, "last_viewed")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
        id,
        content,
        summary,
        response,
        tags,
        favorite,
    })
}

impl super::Database {
    pub(crate) fn insert_record_internal(conn: &Connection, record: &AnalysisRecord) -> Result<()> {
        let response_json = serde_json::to_string(&record.response)?;

        conn.execute(
            "INSERT OR REPLACE INTO analyses (id, content, summary, response, favorite, last_viewed, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.id,
                record.content,
                record.summary,
                response_json,
                record.favorite,
                record.last_viewed.to_rfc3339(),
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )
        .map_err(|e| SolaceError::record_operation(&record.id, "insert", e))?;

        conn.execute(
            "DELETE FROM record_tags WHERE record_id = ?1",
            params![record.id],
        )
        .map_err(|e| SolaceError::record_operation(&record.id, "clear tags for", e))?;

        for tag in &record.tags {
            conn.execute(
                "INSERT OR IGNORE INTO record_tags (record_id, tag) VALUES (?1, ?2)",
                params![record.id, tag],
            )
            .map_err(|e| SolaceError::record_operation(&record.id, "attach tags to", e))?;
        }

        Ok(())
    }

    /// Write a record and register any of its tags missing from the tag
    /// registry, in one transaction. Existing registry colors are kept.
    pub fn save_record(&self, record: &AnalysisRecord, default_tag_color: &str) -> Result<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| SolaceError::transaction("start", e))?;

        Self::insert_record_internal(&tx, record)?;
        for tag in &record.tags {
            Self::upsert_missing_tag_internal(&tx, tag, default_tag_color)?;
        }

        tx.commit()
            .map_err(|e| SolaceError::transaction("commit", e))
    }

    pub fn get_record(&self, id: &str) -> Result<Option<AnalysisRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM analyses WHERE id = ?1",
                RECORD_COLUMNS
            ))
            .map_err(|e| SolaceError::db_operation("prepare record query", e))?;

        let mut rows = stmt
            .query(params![id])
            .map_err(|e| SolaceError::db_operation("execute record query", e))?;

        match rows
            .next()
            .map_err(|e| SolaceError::db_operation("read record row", e))?
        {
            Some(row) => Ok(Some(record_from_row(&self.conn, row)?)),
            None => Ok(None),
        }
    }

    /// Delete a record and its tag memberships. Returns whether it existed.
    pub fn delete_record(&self, id: &str) -> Result<bool> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| SolaceError::transaction("start", e))?;

        tx.execute("DELETE FROM record_tags WHERE record_id = ?1", params![id])
            .map_err(|e| SolaceError::record_operation(id, "clear tags for", e))?;
        let deleted = tx
            .execute("DELETE FROM analyses WHERE id = ?1", params![id])
            .map_err(|e| SolaceError::record_operation(id, "delete", e))?;

        tx.commit()
            .map_err(|e| SolaceError::transaction("commit", e))?;

        Ok(deleted > 0)
    }

    fn query_records(
        &self,
        sql: &str,
        query_params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<AnalysisRecord>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| SolaceError::db_operation("prepare list query", e))?;

        let mut rows = stmt
            .query(query_params)
            .map_err(|e| SolaceError::db_operation("execute list query", e))?;

        let mut results = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| SolaceError::db_operation("read list results", e))?
        {
            results.push(record_from_row(&self.conn, row)?);
        }

        Ok(results)
    }

    /// Records ordered most-recently-updated first
    pub fn list_records(
        &self,
        limit: Option<usize>,
        offset: usize,
    ) -> Result<Vec<AnalysisRecord>> {
        let sql = format!(
            "SELECT {} FROM analyses ORDER BY updated_at DESC, id LIMIT ?1 OFFSET ?2",
            RECORD_COLUMNS
        );
        let limit_param: i64 = match limit {
            Some(n) => n as i64,
            None => -1,
        };
        self.query_records(&sql, &[&limit_param, &(offset as i64)])
    }

    pub fn list_favorites(&self) -> Result<Vec<AnalysisRecord>> {
        let sql = format!(
            "SELECT {} FROM analyses WHERE favorite = 1 ORDER BY updated_at DESC, id",
            RECORD_COLUMNS
        );
        self.query_records(&sql, &[])
    }

    /// Records ordered most-recently-viewed first
    pub fn list_recently_viewed(&self, limit: usize) -> Result<Vec<AnalysisRecord>> {
        let sql = format!(
            "SELECT {} FROM analyses ORDER BY last_viewed DESC, id LIMIT ?1",
            RECORD_COLUMNS
        );
        self.query_records(&sql, &[&(limit as i64)])
    }

    /// Records carrying every one of the given tags
    pub fn list_by_tags(&self, tags: &[String]) -> Result<Vec<AnalysisRecord>> {
        if tags.is_empty() {
            return self.list_records(None, 0);
        }

        let mut sql = format!("SELECT {} FROM analyses", RECORD_COLUMNS);
        let mut filter_params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        for (i, tag) in tags.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE" } else { " AND" });
            sql.push_str(
                " EXISTS (SELECT 1 FROM record_tags WHERE record_tags.record_id = analyses.id AND record_tags.tag = ?)",
            );
            filter_params.push(Box::new(tag.clone()));
        }
        sql.push_str(" ORDER BY updated_at DESC, id");

        let param_refs: Vec<&dyn rusqlite::ToSql> =
            filter_params.iter().map(|p| p.as_ref()).collect();
        self.query_records(&sql, param_refs.as_slice())
    }

    pub fn update_summary(&self, id: &str, summary: &str, now: DateTime<Utc>) -> Result<bool> {
        let changed = self
            .conn
            .execute(
                "UPDATE analyses SET summary = ?1, updated_at = ?2 WHERE id = ?3",
                params![summary, now.to_rfc3339(), id],
            )
            .map_err(|e| SolaceError::record_operation(id, "update summary of", e))?;
        Ok(changed > 0)
    }

    pub fn update_content(&self, id: &str, content: &str, now: DateTime<Utc>) -> Result<bool> {
        let changed = self
            .conn
            .execute(
                "UPDATE analyses SET content = ?1, updated_at = ?2 WHERE id = ?3",
                params![content, now.to_rfc3339(), id],
            )
            .map_err(|e| SolaceError::record_operation(id, "update content of", e))?;
        Ok(changed > 0)
    }

    pub fn set_favorite(&self, id: &str, favorite: bool, now: DateTime<Utc>) -> Result<bool> {
        let changed = self
            .conn
            .execute(
                "UPDATE analyses SET favorite = ?1, updated_at = ?2 WHERE id = ?3",
                params![favorite, now.to_rfc3339(), id],
            )
            .map_err(|e| SolaceError::record_operation(id, "set favorite on", e))?;
        Ok(changed > 0)
    }

    /// Mark a record as viewed now. Bumps both `last_viewed` and `updated_at`.
    pub fn touch_last_viewed(&self, id: &str, now: DateTime<Utc>) -> Result<bool> {
        let changed = self
            .conn
            .execute(
                "UPDATE analyses SET last_viewed = ?1, updated_at = ?1 WHERE id = ?2",
                params![now.to_rfc3339(), id],
            )
            .map_err(|e| SolaceError::record_operation(id, "touch", e))?;
        Ok(changed > 0)
    }

    /// Attach tags to a record, registering new names in the tag registry.
    /// Returns whether the record existed.
    pub fn add_record_tags(
        &self,
        id: &str,
        tags: &[String],
        default_tag_color: &str,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| SolaceError::transaction("start", e))?;

        let exists: bool = tx
            .query_row(
                "SELECT EXISTS (SELECT 1 FROM analyses WHERE id = ?1)",
                params![id],
                |r| r.get(0),
            )
            .map_err(|e| SolaceError::record_operation(id, "look up", e))?;
        if !exists {
            return Ok(false);
        }

        for tag in tags {
            tx.execute(
                "INSERT OR IGNORE INTO record_tags (record_id, tag) VALUES (?1, ?2)",
                params![id, tag],
            )
            .map_err(|e| SolaceError::record_operation(id, "attach tags to", e))?;
            Self::upsert_missing_tag_internal(&tx, tag, default_tag_color)?;
        }

        tx.execute(
            "UPDATE analyses SET updated_at = ?1 WHERE id = ?2",
            params![now.to_rfc3339(), id],
        )
        .map_err(|e| SolaceError::record_operation(id, "touch", e))?;

        tx.commit()
            .map_err(|e| SolaceError::transaction("commit", e))?;

        Ok(true)
    }
}
