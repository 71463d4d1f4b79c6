//! Daily reminder sweep over the current week's unconfirmed assignments.

use anyhow::Result;

use super::{base_url, confirm_url, load_or_empty};
use crate::config::Config;
use crate::models::Assignment;
use crate::services::{ConfirmationService, RotationService};
use crate::sms::SmsClient;
use crate::store::Store;

pub async fn run(config: &Config, store: &Store, sms: &SmsClient) -> Result<()> {
    tracing::info!("starting reminder check");

    let (mut state, revision) = load_or_empty(store).await?;

    if state.current_week.assignments.is_empty() {
        tracing::info!("no assignments for current week, skipping reminders");
        return Ok(());
    }

    let confirmations = ConfirmationService::new(config);
    let due: Vec<Assignment> = confirmations
        .due_for_reminder(&state)
        .into_iter()
        .cloned()
        .collect();

    if due.is_empty() {
        tracing::info!("no reminders needed");
        return Ok(());
    }
    tracing::info!(count = due.len(), "assignments needing reminders");

    let rotation = RotationService::new(config)?;
    let base = base_url();
    let mut sent = 0;

    for assignment in &due {
        let (member, chore) = rotation.assignment_details(assignment)?;
        let confirm = confirm_url(&base, &assignment.confirmation_token);

        match sms
            .send_reminder(&member.phone, &member.name, &chore.name, &confirm)
            .await
        {
            Ok(sid) => {
                tracing::info!(member = %member.name, chore = %chore.name, sid = %sid, "reminder sent");
                // Only a delivered reminder counts as reminded.
                confirmations.mark_reminded(&mut state, &assignment.confirmation_token);
                sent += 1;
            }
            Err(e) => {
                tracing::error!(member = %member.name, error = %e, "failed to send reminder");
            }
        }
    }

    if sent > 0 {
        store
            .save(&mut state, &revision, "Mark reminders as sent")
            .await?;
        tracing::info!(sent, "reminders marked as sent");
    }

    tracing::info!("reminder check complete");
    Ok(())
}
