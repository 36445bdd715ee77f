use crate::cli::ColumnAction;
use crate::context::CliContext;
use crate::output;
use airdrop_domain::{Column, ColumnId, Effect, Intent};
use anyhow::bail;
use serde::Serialize;

#[derive(Serialize)]
struct ColumnSummary<'a> {
    id: ColumnId,
    name: &'a str,
    color: &'a str,
    order: i32,
    cards: usize,
}

impl<'a> From<&'a Column> for ColumnSummary<'a> {
    fn from(column: &'a Column) -> Self {
        Self {
            id: column.id,
            name: &column.name,
            color: &column.color,
            order: column.order,
            cards: column.cards.len(),
        }
    }
}

pub fn handle(ctx: &mut CliContext, action: ColumnAction) -> anyhow::Result<()> {
    match action {
        ColumnAction::Add { name, color } => {
            let effect = ctx.execute(
                Intent::AddColumn {
                    name,
                    color: color.unwrap_or_default(),
                },
                false,
            )?;
            let Effect::ColumnAdded(id) = effect else {
                bail!("unexpected result: {:?}", effect);
            };
            output::output_success(ColumnSummary::from(ctx.column(id)?));
        }
        ColumnAction::Edit { id, name, color } => {
            let current = ctx.column(id)?;
            let intent = Intent::EditColumn {
                id,
                name: name.unwrap_or_else(|| current.name.clone()),
                color: color.unwrap_or_else(|| current.color.clone()),
            };
            ctx.execute(intent, false)?;
            output::output_success(ColumnSummary::from(ctx.column(id)?));
        }
        ColumnAction::Remove { id, yes } => {
            let effect = ctx.execute(Intent::RemoveColumn { id }, yes)?;
            let Effect::ColumnRemoved(column) = effect else {
                bail!("unexpected result: {:?}", effect);
            };
            output::output_success(serde_json::json!({
                "removed": column.id,
                "name": column.name,
                "cardsRemoved": column.cards.len(),
            }));
        }
        ColumnAction::List => {
            let columns: Vec<ColumnSummary> = ctx
                .model
                .board()
                .sorted_columns()
                .into_iter()
                .map(ColumnSummary::from)
                .collect();
            output::output_list(columns);
        }
        ColumnAction::Reorder { id, position } => {
            ctx.execute(Intent::ReorderColumn { id, position }, false)?;
            output::output_success(ColumnSummary::from(ctx.column(id)?));
        }
    }
    Ok(())
}
