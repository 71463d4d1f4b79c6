use serde::{Deserialize, Serialize};

/// A household member from the configured roster.
///
/// Members are static configuration: the roster never changes mid-rotation.
/// The `id` is the identity used throughout the persisted state; it must be
/// unique within the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    /// Phone number notifications are sent to, in E.164 format
    /// (e.g. `+15551234567`).
    pub phone: String,
    /// Admins receive the weekly status summary.
    pub is_admin: bool,
}

/// A recurring chore from the configured roster.
///
/// Chores have the same lifecycle as members; the rotation requires exactly
/// one chore per member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chore {
    pub id: String,
    pub name: String,
    pub description: String,
}
