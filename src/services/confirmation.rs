use chrono::Utc;
use thiserror::Error;

use crate::config::Config;
use crate::dates;
use crate::models::{AppState, Assignment};

/// Why a confirmation attempt was rejected. Neither variant mutates state.
#[derive(Debug, Clone, Error)]
pub enum ConfirmError {
    #[error("invalid or expired confirmation token")]
    NotFound,
    /// A second confirmation attempt is reported as a distinct failure, not
    /// silently accepted; the already-confirmed assignment rides along for
    /// the caller's messaging.
    #[error("chore already confirmed")]
    AlreadyConfirmed(Assignment),
}

/// Validates and applies completion confirmations and decides reminder
/// eligibility for the current week.
pub struct ConfirmationService<'c> {
    config: &'c Config,
}

impl<'c> ConfirmationService<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// Linear scan of the current week. The roster is household-sized, so
    /// O(n) is fine.
    pub fn find_by_token<'s>(&self, state: &'s AppState, token: &str) -> Option<&'s Assignment> {
        state
            .current_week
            .assignments
            .iter()
            .find(|a| a.confirmation_token == token)
    }

    /// Record a completion. Sets `confirmed_at` in place and returns the
    /// updated assignment; the caller is responsible for persisting the
    /// state.
    pub fn confirm(&self, state: &mut AppState, token: &str) -> Result<Assignment, ConfirmError> {
        let assignment = state
            .current_week
            .assignments
            .iter_mut()
            .find(|a| a.confirmation_token == token)
            .ok_or(ConfirmError::NotFound)?;

        if assignment.confirmed_at.is_some() {
            return Err(ConfirmError::AlreadyConfirmed(assignment.clone()));
        }

        assignment.confirmed_at = Some(Utc::now());
        Ok(assignment.clone())
    }

    /// Current-week assignments that are unconfirmed, not yet reminded, and
    /// older than the household's reminder threshold. Roster order.
    pub fn due_for_reminder<'s>(&self, state: &'s AppState) -> Vec<&'s Assignment> {
        let threshold = self.config.household.reminder_hours_after;

        state
            .current_week
            .assignments
            .iter()
            .filter(|a| {
                a.confirmed_at.is_none()
                    && a.reminder_sent_at.is_none()
                    && dates::hours_elapsed(a.assigned_at, threshold)
            })
            .collect()
    }

    /// Stamp `reminder_sent_at` on the assignment holding `token`. Called
    /// only after the reminder was actually delivered; the caller persists.
    pub fn mark_reminded(&self, state: &mut AppState, token: &str) {
        if let Some(assignment) = state
            .current_week
            .assignments
            .iter_mut()
            .find(|a| a.confirmation_token == token)
        {
            assignment.reminder_sent_at = Some(Utc::now());
        }
    }

    /// One line per assignment for the admin digest. Assignments whose member
    /// or chore no longer resolves are skipped; under the roster invariant
    /// that never happens.
    pub fn summary_text(&self, state: &AppState) -> String {
        let mut lines = Vec::new();

        for assignment in &state.current_week.assignments {
            let member = self.config.members.iter().find(|m| m.id == assignment.member_id);
            let chore = self.config.chores.iter().find(|c| c.id == assignment.chore_id);
            let (Some(member), Some(chore)) = (member, chore) else {
                continue;
            };

            let status = if assignment.is_confirmed() {
                "Completed"
            } else {
                "Pending"
            };
            lines.push(format!("{}: {} - {}", member.name, chore.name, status));
        }

        lines.join("\n")
    }

    /// Vacuously true when the current week has no assignments.
    pub fn all_confirmed(&self, state: &AppState) -> bool {
        state
            .current_week
            .assignments
            .iter()
            .all(|a| a.confirmed_at.is_some())
    }
}
