use crate::cli::{CardAction, CardAddArgs, CardEditArgs, CardListArgs};
use crate::context::{CliContext, LocatedCard};
use crate::output;
use airdrop_domain::card::checklist_from_texts;
use airdrop_domain::tag::parse_tags;
use airdrop_domain::{CardId, CardUpdate, Effect, FieldUpdate, FilterSet, Intent, NewCard};
use anyhow::bail;

pub fn handle(ctx: &mut CliContext, action: CardAction) -> anyhow::Result<()> {
    match action {
        CardAction::Add(args) => {
            let column_id = args.column;
            let effect = ctx.execute(
                Intent::AddCard {
                    column_id,
                    card: build_new_card(args),
                },
                false,
            )?;
            let id = added_card(effect)?;
            output::output_success(ctx.locate_card(id)?);
        }
        CardAction::Edit(args) => {
            let id = args.id;
            let column_id = ctx.locate_card(id)?.column_id;
            let update = build_card_update(args);
            if update.is_empty() {
                bail!("Nothing to update for card {}", id);
            }
            ctx.execute(
                Intent::EditCard {
                    column_id,
                    card_id: id,
                    update,
                },
                false,
            )?;
            output::output_success(ctx.locate_card(id)?);
        }
        CardAction::Move { id, to } => {
            let from = ctx.locate_card(id)?.column_id;
            ctx.execute(
                Intent::MoveCard {
                    card_id: id,
                    from,
                    to,
                },
                false,
            )?;
            output::output_success(ctx.locate_card(id)?);
        }
        CardAction::Remove { id, yes } => {
            let column_id = ctx.locate_card(id)?.column_id;
            let effect = ctx.execute(
                Intent::RemoveCard {
                    column_id,
                    card_id: id,
                },
                yes,
            )?;
            let Effect::CardRemoved(card) = effect else {
                bail!("unexpected result: {:?}", effect);
            };
            output::output_success(serde_json::json!({
                "removed": card.id,
                "title": card.title,
            }));
        }
        CardAction::Duplicate { id } => {
            let column_id = ctx.locate_card(id)?.column_id;
            let effect = ctx.execute(
                Intent::DuplicateCard {
                    column_id,
                    card_id: id,
                },
                false,
            )?;
            let copy = added_card(effect)?;
            output::output_success(ctx.locate_card(copy)?);
        }
        CardAction::List(args) => {
            let cards = list_cards(ctx, &args);
            output::output_list(cards);
        }
        CardAction::Get { id } => {
            output::output_success(ctx.locate_card(id)?);
        }
        CardAction::Check { id, item } => {
            let column_id = ctx.locate_card(id)?.column_id;
            ctx.execute(
                Intent::ToggleChecklistItem {
                    column_id,
                    card_id: id,
                    item_id: item,
                },
                false,
            )?;
            output::output_success(ctx.locate_card(id)?);
        }
    }
    Ok(())
}

fn added_card(effect: Effect) -> anyhow::Result<CardId> {
    match effect {
        Effect::CardAdded(id) => Ok(id),
        other => bail!("unexpected result: {:?}", other),
    }
}

fn build_new_card(args: CardAddArgs) -> NewCard {
    NewCard {
        title: args.title,
        description: args.description.unwrap_or_default(),
        status: args.status,
        priority: args.priority,
        due_date: args.due,
        link: args.link,
        tags: args.tags.as_deref().map(parse_tags).unwrap_or_default(),
        checklist: checklist_from_texts(&args.items),
        notes: args.notes.unwrap_or_default(),
    }
}

fn build_card_update(args: CardEditArgs) -> CardUpdate {
    let due_date = match (args.due, args.clear_due) {
        (Some(date), _) => FieldUpdate::Set(date),
        (None, true) => FieldUpdate::Clear,
        (None, false) => FieldUpdate::NoChange,
    };
    let link = match (args.link, args.clear_link) {
        (Some(link), _) => FieldUpdate::Set(link),
        (None, true) => FieldUpdate::Clear,
        (None, false) => FieldUpdate::NoChange,
    };
    CardUpdate {
        title: args.title,
        description: args.description,
        status: args.status,
        priority: args.priority,
        due_date,
        link,
        tags: args.tags.as_deref().map(parse_tags),
        checklist: (!args.items.is_empty()).then(|| checklist_from_texts(&args.items)),
        notes: args.notes,
    }
}

fn list_cards<'a>(ctx: &'a CliContext, args: &CardListArgs) -> Vec<LocatedCard<'a>> {
    let mut filters = FilterSet::new();
    if let Some(query) = &args.search {
        filters = filters.with_query(query.as_str());
    }
    if let Some(status) = args.status {
        filters = filters.with_status(status);
    }
    if let Some(priority) = args.priority {
        filters = filters.with_priority(priority);
    }
    let today = ctx.model.today();

    ctx.model
        .board()
        .sorted_columns()
        .into_iter()
        .filter(|column| args.column.map_or(true, |id| column.id == id))
        .flat_map(|column| {
            column.cards.iter().map(move |card| LocatedCard {
                column_id: column.id,
                card,
            })
        })
        .filter(|located| filters.matches(located.card))
        .filter(|located| !args.overdue || located.card.is_overdue(today))
        .collect()
}
