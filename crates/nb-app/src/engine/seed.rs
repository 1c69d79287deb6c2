//! Bootstrap content for a brand-new shared board.

use chrono::Duration;
use nb_core::notice::{Category, Notice, Priority};
use nb_core::ports::ClockPort;
use uuid::Uuid;

/// Fixed bootstrap collection used to seed an empty remote document.
///
/// Seeding is idempotent at the engine level: it only runs when a
/// successful read returned an empty collection and the local board is
/// empty too.
pub fn bootstrap_notices(clock: &dyn ClockPort) -> Vec<Notice> {
    let now = clock.now();
    vec![
        Notice {
            id: Uuid::new_v4().to_string(),
            title: "Welcome to the shared notice board!".to_string(),
            content: "Notices posted here are mirrored to every session watching the same \
                      store. Add, edit and delete entries and they will show up for everyone."
                .to_string(),
            category: Category::Announcement,
            priority: Priority::High,
            created_at: now,
            updated_at: None,
            author: Some("System".to_string()),
            modified_by: None,
        },
        Notice {
            id: Uuid::new_v4().to_string(),
            title: "Try adding your own notice".to_string(),
            content: "Create a notice to post a message everyone can see. Changes sync \
                      automatically between sessions."
                .to_string(),
            category: Category::General,
            priority: Priority::Medium,
            created_at: now - Duration::minutes(1),
            updated_at: None,
            author: Some("System".to_string()),
            modified_by: None,
        },
    ]
}
