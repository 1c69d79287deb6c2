use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::notice::{Category, Priority};

/// Caller-supplied fields for creating or editing a notice.
///
/// `id` and timestamps are assigned by the repository, never by the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeInput {
    pub title: String,
    pub content: String,
    pub category: Category,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl NoticeInput {
    /// Rejects input that would produce a malformed notice.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::MissingContent);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, content: &str) -> NoticeInput {
        NoticeInput {
            title: title.to_string(),
            content: content.to_string(),
            category: Category::General,
            priority: Priority::Low,
            author: None,
        }
    }

    #[test]
    fn accepts_non_empty_fields() {
        assert!(input("hello", "world").validate().is_ok());
    }

    #[test]
    fn rejects_blank_title() {
        assert_eq!(
            input("  ", "world").validate(),
            Err(ValidationError::MissingTitle)
        );
    }

    #[test]
    fn rejects_blank_content() {
        assert_eq!(
            input("hello", "").validate(),
            Err(ValidationError::MissingContent)
        );
    }
}
