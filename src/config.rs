//! Household configuration: the static roster plus rotation settings.
//!
//! Configuration is a JSON document loaded once at startup and validated
//! before any of the domain services see it. Validation failures are fatal.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Chore, Member};

/// Rotation and notification settings for the household.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdConfig {
    pub name: String,
    /// IANA time zone name (e.g. `America/Los_Angeles`) used for week
    /// boundaries.
    pub timezone: String,
    /// Day of week the rotation runs on, 0 = Sunday.
    pub rotation_day: u8,
    /// Hour of day the rotation runs at, 24-hour clock.
    pub rotation_hour: u8,
    /// How many hours after assignment an unconfirmed chore becomes eligible
    /// for a reminder.
    pub reminder_hours_after: u32,
}

/// The full configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub household: HouseholdConfig,
    pub members: Vec<Member>,
    pub chores: Vec<Chore>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("members ({members}) and chores ({chores}) must have equal count")]
    RosterMismatch { members: usize, chores: usize },
    #[error("at least one member must be an admin")]
    NoAdmin,
    #[error("duplicate member id: {0}")]
    DuplicateMemberId(String),
    #[error("duplicate chore id: {0}")]
    DuplicateChoreId(String),
    #[error("unknown time zone: {0}")]
    UnknownTimezone(String),
    #[error("rotation day must be 0-6, got {0}")]
    RotationDayOutOfRange(u8),
    #[error("rotation hour must be 0-23, got {0}")]
    RotationHourOutOfRange(u8),
}

impl Config {
    /// Load and validate a configuration document from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.members.len() != self.chores.len() {
            return Err(ConfigError::RosterMismatch {
                members: self.members.len(),
                chores: self.chores.len(),
            });
        }
        if !self.members.iter().any(|m| m.is_admin) {
            return Err(ConfigError::NoAdmin);
        }

        let mut member_ids = HashSet::new();
        for member in &self.members {
            if !member_ids.insert(member.id.as_str()) {
                return Err(ConfigError::DuplicateMemberId(member.id.clone()));
            }
        }
        let mut chore_ids = HashSet::new();
        for chore in &self.chores {
            if !chore_ids.insert(chore.id.as_str()) {
                return Err(ConfigError::DuplicateChoreId(chore.id.clone()));
            }
        }

        if self.household.timezone.parse::<Tz>().is_err() {
            return Err(ConfigError::UnknownTimezone(
                self.household.timezone.clone(),
            ));
        }
        if self.household.rotation_day > 6 {
            return Err(ConfigError::RotationDayOutOfRange(
                self.household.rotation_day,
            ));
        }
        if self.household.rotation_hour > 23 {
            return Err(ConfigError::RotationHourOutOfRange(
                self.household.rotation_hour,
            ));
        }

        Ok(())
    }

    /// The household's time zone. Validation guarantees the name parses, so
    /// the UTC fallback only covers a config mutated after `validate`.
    pub fn timezone(&self) -> Tz {
        self.household.timezone.parse().unwrap_or(chrono_tz::UTC)
    }
}
