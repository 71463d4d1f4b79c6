use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Assignment;

/// One week's assignments plus the rotation offset that produced them.
///
/// `rotation_index` identifies the offset applied to the member→chore
/// mapping; it advances by one (mod member count) each cycle. The sentinel
/// state before any week has ever been generated is an empty assignment list
/// with `week_of: None` and `rotation_index: -1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekState {
    /// Start of the week (midnight on the first day, in the household's
    /// time zone, stored as UTC). `None` only in the "no week yet" sentinel.
    pub week_of: Option<DateTime<Utc>>,
    pub rotation_index: i32,
    pub assignments: Vec<Assignment>,
}

impl WeekState {
    /// The "no week yet" sentinel.
    pub fn empty() -> Self {
        Self {
            week_of: None,
            rotation_index: -1,
            assignments: Vec::new(),
        }
    }
}

/// The entire persisted document.
///
/// Loaded once per operation from storage, mutated in memory, and written
/// back with an optimistic-concurrency check. `history` is ordered
/// most-recent-first and bounded (see the history service's archive cap).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub current_week: WeekState,
    pub history: Vec<WeekState>,
    pub last_updated: DateTime<Utc>,
}

impl AppState {
    /// Canonical empty document, substituted by callers when storage reports
    /// that no document exists yet.
    pub fn empty() -> Self {
        Self {
            current_week: WeekState::empty(),
            history: Vec::new(),
            last_updated: Utc::now(),
        }
    }
}
