//! Tag operations on the journal store
//!
//! All user-facing tag mutations land here so the reserved-name rules are
//! enforced in one place. Seeding and save-time registration go straight to
//! the database layer and are exempt.

use chrono::Utc;

use crate::error::{Result, SolaceError};
use crate::tag::{is_reserved, validate_color, Tag};

impl super::Store {
    pub fn list_tags(&self) -> Result<Vec<Tag>> {
        self.db.list_tags()
    }

    /// Tags with the number of records carrying each, alphabetical.
    pub fn list_tags_with_usage(&self) -> Result<Vec<(Tag, i64)>> {
        self.db.list_tags_with_usage()
    }

    pub fn get_tag(&self, name: &str) -> Result<Tag> {
        self.db
            .get_tag(name)?
            .ok_or_else(|| SolaceError::TagNotFound {
                name: name.to_string(),
            })
    }

    /// Create a tag or recolor an existing one.
    pub fn set_tag(&self, name: &str, color: &str) -> Result<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SolaceError::invalid_value("tag name", "empty"));
        }
        if is_reserved(name) {
            return Err(SolaceError::ReservedTag {
                name: name.to_string(),
            });
        }
        if !validate_color(color) {
            return Err(SolaceError::invalid_value("tag color", color));
        }

        let tag = Tag::new(name, color);
        self.db.upsert_tag(&tag)?;
        Ok(tag)
    }

    /// Delete a tag and strip it from every record carrying it.
    pub fn delete_tag(&self, name: &str) -> Result<()> {
        if is_reserved(name) {
            return Err(SolaceError::ReservedTag {
                name: name.to_string(),
            });
        }
        if !self.db.delete_tag_cascade(name, Utc::now())? {
            return Err(SolaceError::TagNotFound {
                name: name.to_string(),
            });
        }
        tracing::debug!(tag = %name, "deleted tag");
        Ok(())
    }

    /// Rename a tag across the registry and every record. Renaming onto an
    /// existing tag merges memberships, and the renamed tag's color wins.
    pub fn rename_tag(&self, old: &str, new: &str) -> Result<Tag> {
        let new = new.trim();
        if new.is_empty() {
            return Err(SolaceError::invalid_value("tag name", "empty"));
        }
        if is_reserved(old) {
            return Err(SolaceError::ReservedTag {
                name: old.to_string(),
            });
        }
        if is_reserved(new) {
            return Err(SolaceError::ReservedTag {
                name: new.to_string(),
            });
        }
        if old == new {
            return self.get_tag(old);
        }

        if !self.db.rename_tag_cascade(old, new, Utc::now())? {
            return Err(SolaceError::TagNotFound {
                name: old.to_string(),
            });
        }
        tracing::debug!(old = %old, new = %new, "renamed tag");
        self.get_tag(new)
    }
}
