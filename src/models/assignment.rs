use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single member's chore obligation for one week.
///
/// Assignments are created in a batch when a week is generated. The only
/// mutable fields are `confirmed_at` and `reminder_sent_at`, and each is
/// monotonic: it moves from `None` to a timestamp at most once and is never
/// reset.
///
/// `confirmation_token` is an unguessable bearer credential embedded in the
/// confirmation and history links sent to the member; it is unique across all
/// live assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub member_id: String,
    pub chore_id: String,
    pub assigned_at: DateTime<Utc>,
    pub confirmation_token: String,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub reminder_sent_at: Option<DateTime<Utc>>,
}

impl Assignment {
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at.is_some()
    }
}
