//! Whole-store dump and restore
//!
//! A dump is one JSON document carrying every record plus the tag registry,
//! stamped with a format version. Restores run through the same paths as
//! live saves, so a hand-edited dump cannot plant an invalid record, and
//! importing the same dump twice leaves the store unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SolaceError};
use crate::record::AnalysisRecord;
use crate::store::Store;
use crate::tag::{is_reserved, Tag};

/// Format version written to new dumps
pub const DUMP_VERSION: u32 = 1;

/// Serialized snapshot of a journal store
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpDocument {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub records: Vec<AnalysisRecord>,
    pub tags: Vec<Tag>,
}

/// What a restore touched
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub records: usize,
    pub tags: usize,
}

/// Snapshot the store into a dump document
pub fn export_store(store: &Store) -> Result<DumpDocument> {
    Ok(DumpDocument {
        version: DUMP_VERSION,
        exported_at: Utc::now(),
        records: store.list_analyses(None, 0)?,
        tags: store.list_tags()?,
    })
}

/// Restore a dump into the store.
///
/// Tag colors land first so record-side registration cannot shadow them;
/// reserved names are skipped because every store seeds its own. Records
/// are upserted by id with their dumped timestamps and favorite flags.
pub fn import_document(store: &Store, document: DumpDocument) -> Result<ImportSummary> {
    if document.version > DUMP_VERSION {
        return Err(SolaceError::invalid_value(
            "dump file",
            format!(
                "version {} is newer than this build supports ({})",
                document.version, DUMP_VERSION
            ),
        ));
    }

    let mut summary = ImportSummary::default();
    for tag in &document.tags {
        if is_reserved(&tag.name) {
            continue;
        }
        store.set_tag(&tag.name, &tag.color)?;
        summary.tags += 1;
    }
    for record in document.records {
        store.import_analysis(record)?;
        summary.records += 1;
    }
    tracing::info!(
        records = summary.records,
        tags = summary.tags,
        "imported dump"
    );
    Ok(summary)
}

impl DumpDocument {
    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a dump from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
