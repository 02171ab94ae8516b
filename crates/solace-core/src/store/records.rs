//! Record operations on the journal store

use chrono::Utc;

use crate::error::{Result, SolaceError};
use crate::id::generate_id;
use crate::record::{effective_tags, sanitize_tags, AnalysisRecord, AnalysisResponse};
use crate::search::{self, SearchQuery};
use crate::similarity::suggest_similar;
use crate::tag::is_reserved;

impl super::Store {
    /// Save an analysis as a new record, or re-save under `existing_id`.
    ///
    /// The stored tag set is the sanitized user tags plus the derived
    /// severity tag and, when rebuttals are present, `What ifs`. On re-save
    /// the record keeps its `created_at` and `favorite`; `last_viewed` and
    /// `updated_at` become now. The record write and the registration of any
    /// new tags happen in one transaction.
    pub fn save_analysis(
        &self,
        content: &str,
        response: AnalysisResponse,
        user_tags: &[String],
        existing_id: Option<&str>,
    ) -> Result<AnalysisRecord> {
        let now = Utc::now();
        let tags = effective_tags(user_tags, &response);
        let summary = response.summary_or_untitled();

        let existing = match existing_id {
            Some(id) => self.db.get_record(id)?,
            None => None,
        };
        let (created_at, favorite) = existing
            .as_ref()
            .map(|r| (r.created_at, r.favorite))
            .unwrap_or((now, false));
        let id = match existing_id {
            Some(id) => id.to_string(),
            None => generate_id(self.config.id_scheme),
        };

        let record = AnalysisRecord {
            id,
            content: content.to_string(),
            summary,
            response,
            tags,
            favorite,
            last_viewed: now,
            created_at,
            updated_at: now,
        };

        self.db
            .save_record(&record, &self.config.default_tag_color)?;
        tracing::debug!(id = %record.id, tags = record.tags.len(), "saved analysis");
        Ok(record)
    }

    /// Load a dumped record back into the store.
    ///
    /// Goes through the normal save path (response validated, derived tags
    /// recomputed, new tag names registered) but keeps the dumped id,
    /// timestamps, and favorite flag so a dump/import cycle round-trips.
    pub fn import_analysis(&self, record: AnalysisRecord) -> Result<AnalysisRecord> {
        record.response.validate()?;

        let record = AnalysisRecord {
            tags: effective_tags(&record.tags, &record.response),
            ..record
        };

        self.db
            .save_record(&record, &self.config.default_tag_color)?;
        tracing::debug!(id = %record.id, "imported analysis");
        Ok(record)
    }

    /// Fetch a record, erroring when it does not exist.
    pub fn get_analysis(&self, id: &str) -> Result<AnalysisRecord> {
        self.db
            .get_record(id)?
            .ok_or_else(|| SolaceError::RecordNotFound { id: id.to_string() })
    }

    /// Fetch a record and mark it viewed now.
    pub fn view_analysis(&self, id: &str) -> Result<AnalysisRecord> {
        if !self.db.touch_last_viewed(id, Utc::now())? {
            return Err(SolaceError::RecordNotFound { id: id.to_string() });
        }
        self.get_analysis(id)
    }

    pub fn list_analyses(
        &self,
        limit: Option<usize>,
        offset: usize,
    ) -> Result<Vec<AnalysisRecord>> {
        self.db.list_records(limit, offset)
    }

    pub fn list_favorites(&self) -> Result<Vec<AnalysisRecord>> {
        self.db.list_favorites()
    }

    pub fn list_recently_viewed(&self, limit: usize) -> Result<Vec<AnalysisRecord>> {
        self.db.list_recently_viewed(limit)
    }

    pub fn list_by_tags(&self, tags: &[String]) -> Result<Vec<AnalysisRecord>> {
        self.db.list_by_tags(tags)
    }

    /// History search over every record, most-recently-updated first.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<AnalysisRecord>> {
        let start = std::time::Instant::now();
        let records = self.db.list_records(None, 0)?;
        let results: Vec<AnalysisRecord> = records
            .into_iter()
            .filter(|record| search::matches(record, query, &self.config.ranking))
            .collect();
        crate::trace_time!(start, "search", matched = results.len());
        Ok(results)
    }

    /// Similar prior entries for a draft, best first, with scores.
    pub fn suggest_similar(&self, draft: &str) -> Result<Vec<(AnalysisRecord, f64)>> {
        let start = std::time::Instant::now();
        let records = self.db.list_records(None, 0)?;
        let suggestions = suggest_similar(draft, &records, &self.config.ranking);
        crate::trace_time!(start, "suggest_similar", candidates = suggestions.len());
        Ok(suggestions
            .into_iter()
            .map(|s| (s.record.clone(), s.score))
            .collect())
    }

    /// Entries similar to an existing record, ranked against its content.
    /// The record itself never appears in the results.
    pub fn suggest_similar_to(&self, id: &str) -> Result<Vec<(AnalysisRecord, f64)>> {
        let anchor = self.get_analysis(id)?;
        let records: Vec<AnalysisRecord> = self
            .db
            .list_records(None, 0)?
            .into_iter()
            .filter(|r| r.id != anchor.id)
            .collect();
        let suggestions = suggest_similar(&anchor.content, &records, &self.config.ranking);
        Ok(suggestions
            .into_iter()
            .map(|s| (s.record.clone(), s.score))
            .collect())
    }

    /// Replace a record's summary. Bumps `updated_at` only.
    pub fn update_summary(&self, id: &str, summary: &str) -> Result<AnalysisRecord> {
        if !self.db.update_summary(id, summary, Utc::now())? {
            return Err(SolaceError::RecordNotFound { id: id.to_string() });
        }
        self.get_analysis(id)
    }

    /// Replace a record's content. Bumps `updated_at` only.
    pub fn update_content(&self, id: &str, content: &str) -> Result<AnalysisRecord> {
        if !self.db.update_content(id, content, Utc::now())? {
            return Err(SolaceError::RecordNotFound { id: id.to_string() });
        }
        self.get_analysis(id)
    }

    /// Flip a record's favorite flag, returning the new state.
    pub fn toggle_favorite(&self, id: &str) -> Result<bool> {
        let record = self.get_analysis(id)?;
        let favorite = !record.favorite;
        self.db.set_favorite(id, favorite, Utc::now())?;
        tracing::debug!(id = %id, favorite, "toggled favorite");
        Ok(favorite)
    }

    /// Attach tags to a record (set union). Reserved names are rejected;
    /// new names are registered with the default color.
    pub fn add_tags(&self, id: &str, tags: &[String]) -> Result<AnalysisRecord> {
        let tags = sanitize_tags(tags);
        if let Some(reserved) = tags.iter().find(|t| is_reserved(t)) {
            return Err(SolaceError::ReservedTag {
                name: reserved.clone(),
            });
        }

        if !self
            .db
            .add_record_tags(id, &tags, &self.config.default_tag_color, Utc::now())?
        {
            return Err(SolaceError::RecordNotFound { id: id.to_string() });
        }
        self.get_analysis(id)
    }

    /// Delete a record. Its tags survive in the registry.
    pub fn delete_analysis(&self, id: &str) -> Result<()> {
        if !self.db.delete_record(id)? {
            return Err(SolaceError::RecordNotFound { id: id.to_string() });
        }
        tracing::debug!(id = %id, "deleted analysis");
        Ok(())
    }
}
