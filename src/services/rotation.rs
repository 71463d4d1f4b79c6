use chrono::Utc;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::dates;
use crate::models::{Assignment, Chore, Member, WeekState};
use crate::tokens;

/// An assignment referenced a member or chore that does not exist in the
/// roster. This never happens for assignments the engine produced against its
/// own roster; seeing it means the persisted state is corrupt.
#[derive(Debug, Clone, Copy, Error)]
#[error("assignment references an unknown member or chore")]
pub struct IntegrityError;

/// Computes the member→chore mapping for a rotation index and advances the
/// index week over week.
///
/// The mapping is deterministic: member `i` (roster order) gets the chore at
/// `(i + rotation_index) % n`. Only the confirmation token and the assignment
/// timestamp vary between calls.
pub struct RotationService<'c> {
    config: &'c Config,
}

impl<'c> RotationService<'c> {
    /// Fails when the roster violates the one-chore-per-member invariant.
    pub fn new(config: &'c Config) -> Result<Self, ConfigError> {
        if config.members.len() != config.chores.len() {
            return Err(ConfigError::RosterMismatch {
                members: config.members.len(),
                chores: config.chores.len(),
            });
        }
        Ok(Self { config })
    }

    /// Build the full batch of assignments for `rotation_index`, one per
    /// member, each with a fresh confirmation token.
    pub fn assignments_for(&self, rotation_index: u32) -> Vec<Assignment> {
        let n = self.config.members.len();

        self.config
            .members
            .iter()
            .enumerate()
            .map(|(i, member)| {
                let chore = &self.config.chores[(i + rotation_index as usize) % n];
                Assignment {
                    member_id: member.id.clone(),
                    chore_id: chore.id.clone(),
                    assigned_at: Utc::now(),
                    confirmation_token: tokens::generate_token(),
                    confirmed_at: None,
                    reminder_sent_at: None,
                }
            })
            .collect()
    }

    /// Produce the next week's state. A negative `previous_index` is the
    /// "no week yet" sentinel and starts the rotation at index 0.
    pub fn next_week(&self, previous_index: i32) -> WeekState {
        let n = self.config.members.len() as i32;
        let new_index = if previous_index < 0 || n == 0 {
            0
        } else {
            (previous_index + 1) % n
        };

        WeekState {
            week_of: Some(dates::week_start(Utc::now(), self.config.timezone())),
            rotation_index: new_index,
            assignments: self.assignments_for(new_index as u32),
        }
    }

    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.config.members.iter().find(|m| m.id == member_id)
    }

    pub fn chore(&self, chore_id: &str) -> Option<&Chore> {
        self.config.chores.iter().find(|c| c.id == chore_id)
    }

    /// Resolve both sides of an assignment against the roster.
    pub fn assignment_details(
        &self,
        assignment: &Assignment,
    ) -> Result<(&Member, &Chore), IntegrityError> {
        let member = self.member(&assignment.member_id).ok_or(IntegrityError)?;
        let chore = self.chore(&assignment.chore_id).ok_or(IntegrityError)?;
        Ok((member, chore))
    }

    /// Members flagged as admin, in roster order.
    pub fn admins(&self) -> Vec<&Member> {
        self.config.members.iter().filter(|m| m.is_admin).collect()
    }
}
