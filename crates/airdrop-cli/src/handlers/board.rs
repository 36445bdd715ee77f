use crate::context::CliContext;
use crate::output;
use airdrop_domain::{ReminderStats, Statistics};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    #[serde(flatten)]
    board: Statistics,
    completion_percent: u8,
    columns: usize,
    reminders: ReminderStats,
}

pub fn handle_stats(ctx: &CliContext) -> anyhow::Result<()> {
    let board = ctx.model.statistics();
    let report = StatsReport {
        completion_percent: board.completion_percent(),
        columns: ctx.model.board().columns.len(),
        reminders: ctx.scheduler.stats(ctx.model.now()),
        board,
    };
    output::output_success(report);
    Ok(())
}
