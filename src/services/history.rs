use crate::config::Config;
use crate::models::{AppState, CompletionRate, HistoryEntry};

/// Archived weeks retained in the persisted document.
pub const MAX_HISTORY_WEEKS: usize = 5;

/// Weeks shown on a member's history page. Deliberately smaller than the
/// archive cap, and deliberately not applied to completion rates.
const MEMBER_HISTORY_WEEKS: usize = 4;

/// Snapshots completed weeks into a bounded trailing log and answers
/// per-member historical queries.
pub struct HistoryService<'c> {
    config: &'c Config,
}

impl<'c> HistoryService<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// Prepend a snapshot of the current week to the history and truncate to
    /// [`MAX_HISTORY_WEEKS`]. No-op when the current week has no assignments
    /// (the "no week yet" sentinel).
    ///
    /// The snapshot is a full value copy; later mutation of the live week
    /// must never reach an archived one.
    pub fn archive_current_week(&self, state: &mut AppState) {
        if state.current_week.assignments.is_empty() {
            return;
        }

        state.history.insert(0, state.current_week.clone());
        state.history.truncate(MAX_HISTORY_WEEKS);
    }

    /// Up to [`MEMBER_HISTORY_WEEKS`] entries for one member: current week
    /// first, then most-recent-archived first. Weeks where the member has no
    /// assignment are skipped without consuming a slot, as are weeks whose
    /// chore no longer resolves against the roster.
    pub fn member_history(&self, state: &AppState, member_id: &str) -> Vec<HistoryEntry> {
        let mut entries = Vec::new();

        for week in std::iter::once(&state.current_week).chain(state.history.iter()) {
            if entries.len() == MEMBER_HISTORY_WEEKS {
                break;
            }
            let Some(assignment) = week.assignments.iter().find(|a| a.member_id == member_id)
            else {
                continue;
            };
            let Some(chore) = self.config.chores.iter().find(|c| c.id == assignment.chore_id)
            else {
                continue;
            };
            let Some(week_of) = week.week_of else {
                continue;
            };

            entries.push(HistoryEntry {
                week_of,
                chore_name: chore.name.clone(),
                chore_description: chore.description.clone(),
                confirmed: assignment.confirmed_at.is_some(),
                confirmed_at: assignment.confirmed_at,
            });
        }

        entries
    }

    /// Resolve a confirmation token to its member, looking only at the
    /// current week. Tokens of archived weeks stay unresolvable on purpose:
    /// old links are expired.
    pub fn find_member_by_token<'s>(&self, state: &'s AppState, token: &str) -> Option<&'s str> {
        state
            .current_week
            .assignments
            .iter()
            .find(|a| a.confirmation_token == token)
            .map(|a| a.member_id.as_str())
    }

    /// Completed/total counts for one member over everything retained, the
    /// current week included. Unlike [`Self::member_history`] this scan is
    /// unbounded.
    pub fn completion_rate(&self, state: &AppState, member_id: &str) -> CompletionRate {
        let mut completed = 0;
        let mut total = 0;

        for week in std::iter::once(&state.current_week).chain(state.history.iter()) {
            if let Some(assignment) = week.assignments.iter().find(|a| a.member_id == member_id) {
                total += 1;
                if assignment.confirmed_at.is_some() {
                    completed += 1;
                }
            }
        }

        CompletionRate { completed, total }
    }
}
