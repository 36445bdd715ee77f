use airdrop_core::{AppConfig, Clock, KeyValueStore};
use airdrop_domain::{
    BoardModel, Card, CardId, Column, ColumnId, Controller, Effect, Intent,
    NotificationScheduler, Outcome,
};
use airdrop_persistence::{BoardStore, PreferenceStore, ReminderStore};
use anyhow::{anyhow, bail};
use serde::Serialize;
use std::sync::Arc;

/// Everything a single CLI invocation works with, wired over one key/value store.
pub struct CliContext {
    pub model: BoardModel,
    pub controller: Controller,
    pub scheduler: NotificationScheduler,
    pub preferences: PreferenceStore,
}

/// A card together with the column holding it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatedCard<'a> {
    pub column_id: ColumnId,
    #[serde(flatten)]
    pub card: &'a Card,
}

impl CliContext {
    pub fn open(config: AppConfig, kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let preferences = PreferenceStore::new(kv.clone(), &config.defaults);
        let language = preferences.language();
        let model = BoardModel::new(
            Box::new(BoardStore::new(kv.clone(), clock.clone())),
            clock.clone(),
        );
        let scheduler = NotificationScheduler::new(
            Box::new(ReminderStore::new(kv, clock)),
            language,
            config.notifications.prune_after_days,
        );
        let controller = Controller::new(&config, language);
        Self {
            model,
            controller,
            scheduler,
            preferences,
        }
    }

    /// Runs an intent through the controller. Destructive intents only go
    /// through when `confirmed`; otherwise the confirmation prompt is the error.
    pub fn execute(&mut self, intent: Intent, confirmed: bool) -> anyhow::Result<Effect> {
        match self.controller.handle(&mut self.model, intent) {
            Outcome::NeedsConfirmation(request) if confirmed => {
                let outcome = self.controller.confirm(&mut self.model, request.action);
                settle(outcome)
            }
            Outcome::NeedsConfirmation(request) => {
                bail!("{} Re-run with --yes to confirm.", request.message)
            }
            outcome => settle(outcome),
        }
    }

    pub fn column(&self, id: ColumnId) -> anyhow::Result<&Column> {
        self.model
            .column(id)
            .ok_or_else(|| anyhow!("Column not found: {}", id))
    }

    pub fn locate_card(&self, id: CardId) -> anyhow::Result<LocatedCard<'_>> {
        self.model
            .card(id)
            .map(|(column_id, card)| LocatedCard { column_id, card })
            .ok_or_else(|| anyhow!("Card not found: {}", id))
    }
}

fn settle(outcome: Outcome) -> anyhow::Result<Effect> {
    match outcome {
        Outcome::Applied { toast, effect } => {
            tracing::debug!(message = %toast.message, ?effect, "intent applied");
            Ok(effect)
        }
        Outcome::Rejected { toast, error } => Err(anyhow!("{} ({})", toast.message, error)),
        Outcome::NeedsConfirmation(request) => Err(anyhow!(request.message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airdrop_core::FixedClock;
    use airdrop_domain::NewCard;
    use airdrop_persistence::MemoryStore;
    use chrono::NaiveDate;

    fn context() -> CliContext {
        let clock = Arc::new(FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        CliContext::open(AppConfig::default(), Arc::new(MemoryStore::new()), clock)
    }

    #[test]
    fn test_remove_without_confirmation_keeps_column() {
        let mut ctx = context();
        let Effect::ColumnAdded(id) = ctx
            .execute(
                Intent::AddColumn {
                    name: "Claimed".into(),
                    color: String::new(),
                },
                false,
            )
            .unwrap()
        else {
            panic!("expected a new column");
        };

        let err = ctx.execute(Intent::RemoveColumn { id }, false).unwrap_err();
        assert!(err.to_string().contains("Claimed"));
        assert!(err.to_string().contains("--yes"));
        assert!(ctx.model.column(id).is_some());

        ctx.execute(Intent::RemoveColumn { id }, true).unwrap();
        assert!(ctx.model.column(id).is_none());
    }

    #[test]
    fn test_locate_card_reports_its_column() {
        let mut ctx = context();
        let column = ctx.model.add_column("Todo", "").unwrap();
        let card = ctx.model.add_card(column, NewCard::titled("Zora")).unwrap();

        let located = ctx.locate_card(card).unwrap();
        assert_eq!(located.column_id, column);

        let value = serde_json::to_value(&located).unwrap();
        assert_eq!(value["columnId"], column);
        assert_eq!(value["title"], "Zora");
        assert!(ctx.locate_card(card + 100).is_err());
    }

    #[test]
    fn test_rejected_intent_is_an_error() {
        let mut ctx = context();
        let err = ctx
            .execute(
                Intent::AddColumn {
                    name: "   ".into(),
                    color: String::new(),
                },
                false,
            )
            .unwrap_err();
        assert!(!err.to_string().is_empty());
        assert!(ctx.model.board().columns.is_empty());
    }
}
