use crate::cli::ReminderAction;
use crate::context::CliContext;
use crate::output;
use airdrop_domain::{CheckReport, Notification, Reminder};
use anyhow::bail;
use chrono::Duration;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOutput {
    #[serde(flatten)]
    report: CheckReport,
    notifications: Vec<Notification>,
}

pub fn handle(ctx: &mut CliContext, action: ReminderAction) -> anyhow::Result<()> {
    let now = ctx.model.now();
    match action {
        ReminderAction::Add {
            title,
            message,
            at,
            in_minutes,
            id,
        } => {
            let fire_at = match (at, in_minutes) {
                (Some(at), _) => at,
                (None, Some(minutes)) => now + Duration::minutes(minutes),
                (None, None) => bail!("Either --at or --in-minutes is required"),
            };
            let reminder = ctx
                .scheduler
                .schedule(Reminder::new(id, title, message, fire_at, now))?;
            output::output_success(reminder);
        }
        ReminderAction::List => {
            output::output_list(ctx.scheduler.reminders().to_vec());
        }
        ReminderAction::Cancel { id } => match ctx.scheduler.cancel(&id)? {
            Some(reminder) => output::output_success(serde_json::json!({
                "cancelled": reminder.id,
                "title": reminder.title,
            })),
            None => bail!("Reminder not found: {}", id),
        },
        ReminderAction::Clear { yes } => {
            let count = ctx.scheduler.reminders().len();
            if !yes && count > 0 {
                bail!("This removes all {} reminders. Re-run with --yes to confirm.", count);
            }
            let cleared = ctx.scheduler.clear()?;
            output::output_success(serde_json::json!({ "cleared": cleared }));
        }
        ReminderAction::Check => {
            let mut notifications: Vec<Notification> = Vec::new();
            let report = ctx.scheduler.check(
                ctx.model.board(),
                now,
                ctx.model.today(),
                &mut notifications,
            )?;
            output::output_success(CheckOutput {
                report,
                notifications,
            });
        }
    }
    Ok(())
}
