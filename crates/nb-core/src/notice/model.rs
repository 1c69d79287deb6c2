use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category tag from the board's fixed set.
///
/// Values outside the set are preserved verbatim so a collection written
/// by a newer client survives a round-trip through an older one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Announcement,
    Reminder,
    Urgent,
    General,
    #[serde(untagged)]
    Other(String),
}

/// Priority tag. Unknown values are preserved but not specially rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    #[serde(untagged)]
    Other(String),
}

/// A single user-authored record on the board.
///
/// `id` is assigned at creation and never reassigned; it is the merge key
/// for the whole collection. `created_at` is the sole ordering key for
/// display (newest first). `author` and `modified_by` are advisory
/// attribution only and are never consulted for conflict resolution.
///
/// Field names serialize in camelCase to stay wire-compatible with the
/// JSON documents the hosted stores already hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
}

impl Notice {
    /// A notice is well-formed iff title and content are both non-empty.
    pub fn is_well_formed(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }
}

/// Sort for display: `created_at` descending.
pub fn sort_newest_first(notices: &mut [Notice]) {
    notices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
