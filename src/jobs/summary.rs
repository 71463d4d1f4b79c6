//! Weekly status digest for household admins. Read-only.

use anyhow::Result;

use super::load_or_empty;
use crate::config::Config;
use crate::services::{ConfirmationService, RotationService};
use crate::sms::SmsClient;
use crate::store::Store;

pub async fn run(config: &Config, store: &Store, sms: &SmsClient) -> Result<()> {
    tracing::info!("starting weekly summary");

    let (state, _) = load_or_empty(store).await?;

    if state.current_week.assignments.is_empty() {
        tracing::info!("no assignments for current week, skipping summary");
        return Ok(());
    }

    let confirmations = ConfirmationService::new(config);
    let summary = confirmations.summary_text(&state);
    tracing::info!(summary = %summary, "current week status");

    let rotation = RotationService::new(config)?;
    let admins = rotation.admins();
    if admins.is_empty() {
        tracing::info!("no admins configured, skipping summary delivery");
        return Ok(());
    }

    for admin in admins {
        match sms
            .send_admin_summary(&admin.phone, &admin.name, &summary)
            .await
        {
            Ok(sid) => tracing::info!(admin = %admin.name, sid = %sid, "summary sent"),
            Err(e) => {
                tracing::error!(admin = %admin.name, error = %e, "failed to send summary");
            }
        }
    }

    tracing::info!("weekly summary complete");
    Ok(())
}
