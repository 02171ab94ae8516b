//! Tag model and system-reserved tag rules
//!
//! Tags are named, colored labels shared across analysis records. Two kinds
//! of names are system-reserved and refuse user mutation: `What ifs` and any
//! `Level N` where N is a run of digits. Reserved tags are derived from the
//! analysis response at save time, so letting users rename or delete them
//! would desynchronize the derived memberships.

use serde::{Deserialize, Serialize};

/// Tag applied to records containing rebuttal material
pub const WHAT_IFS: &str = "What ifs";

/// Color given to tags created implicitly at save time
pub const DEFAULT_TAG_COLOR: &str = "#88C0D0";

/// Colors for the seeded system tags, Nord palette
const SYSTEM_PALETTE: [(&str, &str); 6] = [
    (WHAT_IFS, DEFAULT_TAG_COLOR),
    ("Level 1", "#A3BE8C"),
    ("Level 2", "#A3BE8C"),
    ("Level 3", "#EBCB8B"),
    ("Level 4", "#D08770"),
    ("Level 5", "#BF616A"),
];

/// A named, colored label attachable to many records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique name, also the display label
    pub name: String,
    /// Display color as a `#RRGGBB` hex string
    pub color: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// The severity tag derived from an analysis response
pub fn level_tag(severity: f64) -> String {
    format!("Level {}", severity.round() as i64)
}

/// Whether a tag name is system-reserved.
///
/// Any digit run after `Level ` counts, not just the 1-5 the seeded palette
/// covers, so the namespace stays closed to user mutation.
pub fn is_reserved(name: &str) -> bool {
    if name == WHAT_IFS {
        return true;
    }
    match name.strip_prefix("Level ") {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

/// Tags seeded into every new store
pub fn system_tags() -> Vec<Tag> {
    SYSTEM_PALETTE
        .iter()
        .map(|(name, color)| Tag::new(*name, *color))
        .collect()
}

/// Validate a `#RRGGBB` color string
pub fn validate_color(color: &str) -> bool {
    let Some(hex) = color.strip_prefix('#') else {
        return false;
    };
    hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
}
