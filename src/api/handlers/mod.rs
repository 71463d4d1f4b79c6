use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;

use super::pages;
use super::AppContext;
use crate::models::{AppState, HistoryEntry};
use crate::services::{ConfirmError, ConfirmationService, HistoryService};
use crate::store::{Revision, StoreError};

#[derive(Deserialize)]
pub struct TokenQuery {
    token: Option<String>,
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Confirmation
// ============================================================

enum ConfirmFailure {
    NotFound,
    AlreadyConfirmed,
    Conflict,
    Internal,
}

pub async fn confirm(
    State(ctx): State<AppContext>,
    Query(query): Query<TokenQuery>,
) -> (StatusCode, Html<String>) {
    let Some(token) = query.token else {
        return invalid_link();
    };

    match apply_confirmation(&ctx, &token).await {
        Ok((member_name, chore_name)) => (
            StatusCode::OK,
            Html(pages::result_page(
                "Chore Confirmed!",
                &format!(
                    "Thank you, {member_name}! Your completion of \"{chore_name}\" \
                     has been recorded."
                ),
                true,
            )),
        ),
        Err(ConfirmFailure::NotFound) => invalid_link(),
        Err(ConfirmFailure::AlreadyConfirmed) => (
            StatusCode::BAD_REQUEST,
            Html(pages::result_page(
                "Confirmation Issue",
                "This chore has already been confirmed.",
                false,
            )),
        ),
        Err(ConfirmFailure::Conflict) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Html(pages::result_page(
                "Please Try Again",
                "The schedule was being updated at the same moment. \
                 Your confirmation was not recorded; please use the link again.",
                false,
            )),
        ),
        Err(ConfirmFailure::Internal) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(pages::result_page(
                "Error",
                "An error occurred. Please try again later.",
                false,
            )),
        ),
    }
}

fn invalid_link() -> (StatusCode, Html<String>) {
    (
        StatusCode::BAD_REQUEST,
        Html(pages::result_page(
            "Invalid Link",
            "This confirmation link is invalid or has expired.",
            false,
        )),
    )
}

/// Load, confirm, persist. Returns the member and chore names for the
/// success page.
async fn apply_confirmation(
    ctx: &AppContext,
    token: &str,
) -> Result<(String, String), ConfirmFailure> {
    let (mut state, revision) = load_or_empty(ctx).await.map_err(|e| {
        tracing::error!(error = %e, "failed to load state for confirmation");
        ConfirmFailure::Internal
    })?;

    let confirmations = ConfirmationService::new(&ctx.config);
    let assignment = confirmations
        .confirm(&mut state, token)
        .map_err(|e| match e {
            ConfirmError::NotFound => ConfirmFailure::NotFound,
            ConfirmError::AlreadyConfirmed(_) => ConfirmFailure::AlreadyConfirmed,
        })?;

    let message = format!("Confirm chore completion for {}", assignment.member_id);
    ctx.store
        .save(&mut state, &revision, &message)
        .await
        .map_err(|e| match e {
            StoreError::Conflict => ConfirmFailure::Conflict,
            e => {
                tracing::error!(error = %e, "failed to save confirmed state");
                ConfirmFailure::Internal
            }
        })?;

    let member_name = ctx
        .config
        .members
        .iter()
        .find(|m| m.id == assignment.member_id)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| assignment.member_id.clone());
    let chore_name = ctx
        .config
        .chores
        .iter()
        .find(|c| c.id == assignment.chore_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| assignment.chore_id.clone());

    Ok((member_name, chore_name))
}

// ============================================================
// History
// ============================================================

pub async fn history(
    State(ctx): State<AppContext>,
    Query(query): Query<TokenQuery>,
) -> (StatusCode, Html<String>) {
    let Some(token) = query.token else {
        return (
            StatusCode::BAD_REQUEST,
            Html(pages::error_page("Invalid or missing token")),
        );
    };

    let (state, _) = match load_or_empty(&ctx).await {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(error = %e, "failed to load state for history");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(pages::error_page("An error occurred. Please try again later.")),
            );
        }
    };

    let history = HistoryService::new(&ctx.config);
    let Some(member_id) = history.find_member_by_token(&state, &token) else {
        // Archived tokens resolve to nothing on purpose: old links expire.
        return (
            StatusCode::NOT_FOUND,
            Html(pages::error_page(
                "Member not found. This link may have expired.",
            )),
        );
    };

    let member_name = ctx
        .config
        .members
        .iter()
        .find(|m| m.id == member_id)
        .map(|m| m.name.as_str())
        .unwrap_or(member_id);
    let entries: Vec<HistoryEntry> = history.member_history(&state, member_id);

    (
        StatusCode::OK,
        Html(pages::history_page(member_name, &entries)),
    )
}

async fn load_or_empty(ctx: &AppContext) -> Result<(AppState, Revision), StoreError> {
    match ctx.store.load().await {
        Ok(loaded) => Ok(loaded),
        Err(StoreError::NotFound) => Ok((AppState::empty(), Revision::initial())),
        Err(e) => Err(e),
    }
}
