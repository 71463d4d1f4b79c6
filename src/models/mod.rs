//! Domain models for ChoreWheel.
//!
//! # Core Concepts
//!
//! ## Roster (static)
//!
//! - [`Member`]: A household member, loaded from configuration. Immutable
//!   during a rotation cycle.
//! - [`Chore`]: A recurring chore definition, same lifecycle as [`Member`].
//!   The roster invariant requires exactly as many chores as members.
//!
//! ## Rotating state (persisted)
//!
//! - [`Assignment`]: One member's chore obligation for one week, including its
//!   confirmation lifecycle. Created in a batch when a week is generated.
//! - [`WeekState`]: One week's worth of assignments plus the rotation offset
//!   that produced them.
//! - [`AppState`]: The entire persisted document: the active week plus a
//!   bounded trailing log of archived weeks.
//!
//! ## Views
//!
//! - [`HistoryEntry`]: A per-member, per-week row for the history page.
//! - [`CompletionRate`]: Completed/total counts across retained weeks.

mod assignment;
mod history;
mod member;
mod week;

pub use assignment::*;
pub use history::*;
pub use member::*;
pub use week::*;
