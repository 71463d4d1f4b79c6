use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A per-member, per-week row of the history view.
///
/// Chore name and description are resolved from the roster at query time;
/// the persisted state only stores chore ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub week_of: DateTime<Utc>,
    pub chore_name: String,
    pub chore_description: String,
    pub confirmed: bool,
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// Completed/total assignment counts for one member across retained weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRate {
    pub completed: u32,
    pub total: u32,
}
