//! Scheduled entry points: weekly rotation, daily reminder sweep, and the
//! weekly admin summary.
//!
//! Each job loads one state snapshot, applies its mutations through the
//! domain services, and persists at most once. A stale-revision conflict on
//! save aborts the run; jobs never re-derive work on top of data that
//! changed underneath them.

pub mod remind;
pub mod rotate;
pub mod summary;

use crate::models::AppState;
use crate::store::{Revision, Store, StoreError};

/// Base URL the confirmation and history links point at.
fn base_url() -> String {
    std::env::var("CHOREWHEEL_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn confirm_url(base: &str, token: &str) -> String {
    format!("{base}/confirm?token={token}")
}

fn history_url(base: &str, token: &str) -> String {
    format!("{base}/history?token={token}")
}

/// Load the state document, substituting the canonical empty document when
/// none exists yet.
pub(crate) async fn load_or_empty(store: &Store) -> Result<(AppState, Revision), StoreError> {
    match store.load().await {
        Ok(loaded) => Ok(loaded),
        Err(StoreError::NotFound) => Ok((AppState::empty(), Revision::initial())),
        Err(e) => Err(e),
    }
}
