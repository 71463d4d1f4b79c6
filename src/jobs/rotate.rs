//! Weekly rotation: archive the outgoing week, generate the next one, and
//! notify every member of their new chore.

use anyhow::Result;

use super::{base_url, confirm_url, history_url, load_or_empty};
use crate::config::Config;
use crate::services::{HistoryService, RotationService};
use crate::sms::SmsClient;
use crate::store::Store;

pub async fn run(config: &Config, store: &Store, sms: &SmsClient) -> Result<()> {
    tracing::info!(
        household = %config.household.name,
        members = config.members.len(),
        chores = config.chores.len(),
        "starting weekly rotation"
    );

    let (mut state, revision) = load_or_empty(store).await?;

    let history = HistoryService::new(config);
    if !state.current_week.assignments.is_empty() {
        history.archive_current_week(&mut state);
        tracing::info!("archived previous week to history");
    }

    let rotation = RotationService::new(config)?;
    let previous_index = state.current_week.rotation_index;
    state.current_week = rotation.next_week(previous_index);

    tracing::info!(
        rotation_index = state.current_week.rotation_index,
        week_of = ?state.current_week.week_of,
        "created new week"
    );

    let base = base_url();
    for assignment in &state.current_week.assignments {
        let (member, chore) = rotation.assignment_details(assignment)?;
        let confirm = confirm_url(&base, &assignment.confirmation_token);
        let history_link = history_url(&base, &assignment.confirmation_token);

        match sms
            .send_assignment(
                &member.phone,
                &member.name,
                &chore.name,
                &chore.description,
                &confirm,
                &history_link,
            )
            .await
        {
            Ok(sid) => {
                tracing::info!(member = %member.name, chore = %chore.name, sid = %sid, "assignment notice sent");
            }
            Err(e) => {
                // One failed delivery must not stop the rest of the batch.
                tracing::error!(member = %member.name, error = %e, "failed to send assignment notice");
            }
        }
    }

    store
        .save(&mut state, &revision, "Weekly rotation: new assignments")
        .await?;

    tracing::info!("weekly rotation complete");
    Ok(())
}
