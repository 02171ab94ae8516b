//! Record ID generation for solace
//!
//! IDs are opaque strings with a `sol-` prefix. Two schemes are supported:
//! - `ulid` (default): time-ordered ULID identifiers, e.g. `sol-01hqv3x8...`
//! - `timestamp`: millisecond timestamps, e.g. `sol-1709136000000`
//!
//! An ID is assigned once when a record is first saved and never changes,
//! no matter how often the record is edited or re-analyzed.

use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SolaceError};

/// The standard ID prefix
pub const ID_PREFIX: &str = "sol-";

/// ID generation scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// ULID-based IDs (default): `sol-<ulid>`
    #[default]
    Ulid,
    /// Timestamp-based IDs: `sol-<millis>`
    Timestamp,
}

impl FromStr for IdScheme {
    type Err = SolaceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ulid" => Ok(IdScheme::Ulid),
            "timestamp" => Ok(IdScheme::Timestamp),
            other => Err(SolaceError::invalid_value("id scheme", other)),
        }
    }
}

/// Generate a fresh record ID using the given scheme
pub fn generate_id(scheme: IdScheme) -> String {
    match scheme {
        IdScheme::Ulid => format!("{}{}", ID_PREFIX, ulid::Ulid::new().to_string().to_lowercase()),
        IdScheme::Timestamp => format!("{}{}", ID_PREFIX, Utc::now().timestamp_millis()),
    }
}

/// Validate an ID string
///
/// Accepts any non-empty alphanumeric suffix after the prefix so IDs from
/// either scheme (and imported histories) pass.
pub fn validate_id(id: &str) -> Result<()> {
    let suffix = id
        .strip_prefix(ID_PREFIX)
        .ok_or_else(|| SolaceError::invalid_value("record id", id))?;

    if suffix.is_empty() || !suffix.chars().all(|c| c.is_alphanumeric()) {
        return Err(SolaceError::invalid_value("record id", id));
    }

    Ok(())
}
