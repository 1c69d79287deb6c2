use crate::notice::{Category, Notice, Priority};

/// Display filter applied when listing the board: free-text search plus
/// optional category/priority narrowing.
///
/// The default filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeFilter {
    /// Case-insensitive substring matched against title and content.
    pub search: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
}

impl NoticeFilter {
    pub fn matches(&self, notice: &Notice) -> bool {
        if let Some(query) = &self.search {
            let query = query.to_lowercase();
            let hit = notice.title.to_lowercase().contains(&query)
                || notice.content.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &notice.category != category {
                return false;
            }
        }
        if let Some(priority) = &self.priority {
            if &notice.priority != priority {
                return false;
            }
        }
        true
    }
}
