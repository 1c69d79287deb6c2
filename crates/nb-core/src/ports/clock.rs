use chrono::{DateTime, Utc};

/// Wall-clock source, abstracted so tests can pin `created_at` and
/// `updated_at` to fixed instants.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
