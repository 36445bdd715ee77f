//! Translates user intents into model operations and user-facing toasts.
//!
//! Destructive intents never touch the model directly: they produce a
//! [`ConfirmRequest`] carrying the pending action, and the frontend hands that
//! action back to [`Controller::confirm`] at most once.

use airdrop_core::config::ValidationLimits;
use airdrop_core::{AppConfig, BoardError, BoardResult};
use chrono::NaiveDate;

use crate::card::{Card, CardId};
use crate::column::{Column, ColumnId};
use crate::field_update::{CardUpdate, NewCard};
use crate::i18n::{t, tf, Label};
use crate::model::BoardModel;
use crate::preferences::{Language, Theme};
use crate::validation::{
    validate_card_update, validate_column, validate_new_card, ValidationIssue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Info)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Danger)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    AddColumn { name: String, color: String },
    EditColumn { id: ColumnId, name: String, color: String },
    ReorderColumn { id: ColumnId, position: usize },
    RemoveColumn { id: ColumnId },
    AddCard { column_id: ColumnId, card: NewCard },
    EditCard { column_id: ColumnId, card_id: CardId, update: CardUpdate },
    MoveCard { card_id: CardId, from: ColumnId, to: ColumnId },
    DuplicateCard { column_id: ColumnId, card_id: CardId },
    RemoveCard { column_id: ColumnId, card_id: CardId },
    ToggleChecklistItem { column_id: ColumnId, card_id: CardId, item_id: u32 },
    Import { payload: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    RemoveColumn { id: ColumnId },
    RemoveCard { column_id: ColumnId, card_id: CardId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub action: PendingAction,
}

/// What a successful intent did, for frontends that need the affected entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ColumnAdded(ColumnId),
    ColumnChanged(ColumnId),
    ColumnRemoved(Column),
    CardAdded(CardId),
    CardChanged(CardId),
    CardRemoved(Card),
    ChecklistToggled { item_id: u32, done: bool },
    Imported,
}

#[derive(Debug)]
pub enum Outcome {
    Applied { toast: Toast, effect: Effect },
    Rejected { toast: Toast, error: BoardError },
    NeedsConfirmation(ConfirmRequest),
}

impl Outcome {
    pub fn toast(&self) -> Option<&Toast> {
        match self {
            Outcome::Applied { toast, .. } | Outcome::Rejected { toast, .. } => Some(toast),
            Outcome::NeedsConfirmation(_) => None,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub payload: String,
}

#[derive(Debug, Clone)]
pub struct Controller {
    language: Language,
    limits: ValidationLimits,
    max_columns: usize,
    max_cards_per_column: usize,
    config: AppConfig,
}

impl Controller {
    pub fn new(config: &AppConfig, language: Language) -> Self {
        Self {
            language,
            limits: config.validation.clone(),
            max_columns: config.ui.max_columns,
            max_cards_per_column: config.ui.max_cards_per_column,
            config: config.clone(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) -> Toast {
        self.language = language;
        Toast::info(t(language, Label::LanguageChanged))
    }

    pub fn theme_changed(&self, theme: Theme) -> Toast {
        Toast::info(tf(self.language, Label::ThemeChanged, &[("theme", theme.as_str())]))
    }

    pub fn label(&self, label: Label) -> &'static str {
        t(self.language, label)
    }

    pub fn handle(&self, model: &mut BoardModel, intent: Intent) -> Outcome {
        match intent {
            Intent::RemoveColumn { id } => {
                self.confirmation(model, PendingAction::RemoveColumn { id })
            }
            Intent::RemoveCard { column_id, card_id } => {
                self.confirmation(model, PendingAction::RemoveCard { column_id, card_id })
            }
            intent => self.apply(model, intent),
        }
    }

    /// Runs an action the user has confirmed.
    pub fn confirm(&self, model: &mut BoardModel, action: PendingAction) -> Outcome {
        match action {
            PendingAction::RemoveColumn { id } => self.finish(
                model.remove_column(id).map(Effect::ColumnRemoved),
                Toast::info(self.label(Label::ColumnRemoved)),
            ),
            PendingAction::RemoveCard { column_id, card_id } => self.finish(
                model.remove_card(column_id, card_id).map(Effect::CardRemoved),
                Toast::info(self.label(Label::CardRemoved)),
            ),
        }
    }

    pub fn export(&self, model: &BoardModel, today: NaiveDate) -> BoardResult<ExportFile> {
        Ok(ExportFile {
            filename: self.config.export_filename(today),
            payload: model.export_snapshot()?,
        })
    }

    /// User-facing message for a failed operation.
    pub fn error_toast(&self, error: &BoardError) -> Toast {
        let message = match error {
            BoardError::NotFound(_) => self.label(Label::NotFound).to_string(),
            BoardError::Validation(detail) => {
                tf(self.language, Label::InvalidInput, &[("detail", detail.as_str())])
            }
            BoardError::InvalidImport(_) => self.label(Label::ImportInvalid).to_string(),
            _ => self.label(Label::SaveFailed).to_string(),
        };
        Toast::danger(message)
    }

    fn confirmation(&self, model: &BoardModel, action: PendingAction) -> Outcome {
        let request = match action {
            PendingAction::RemoveColumn { id } => model.column(id).map(|column| {
                let count = column.cards.len();
                let message = if count > 0 {
                    tf(
                        self.language,
                        Label::ConfirmRemoveColumnWithCards,
                        &[("name", column.name.as_str()), ("count", count.to_string().as_str())],
                    )
                } else {
                    tf(
                        self.language,
                        Label::ConfirmRemoveColumn,
                        &[("name", column.name.as_str())],
                    )
                };
                ConfirmRequest {
                    title: self.label(Label::ConfirmRemoveColumnTitle).to_string(),
                    message,
                    action,
                }
            }),
            PendingAction::RemoveCard { column_id, card_id } => model
                .column(column_id)
                .and_then(|column| column.card(card_id))
                .map(|card| ConfirmRequest {
                    title: self.label(Label::ConfirmRemoveCardTitle).to_string(),
                    message: tf(
                        self.language,
                        Label::ConfirmRemoveCard,
                        &[("title", card.title.as_str())],
                    ),
                    action,
                }),
        };
        match request {
            Some(request) => Outcome::NeedsConfirmation(request),
            None => self.reject(BoardError::not_found(format!("{:?}", action))),
        }
    }

    fn apply(&self, model: &mut BoardModel, intent: Intent) -> Outcome {
        match intent {
            Intent::AddColumn { name, color } => {
                if let Err(issue) = validate_column(&name, &color) {
                    return self.invalid(issue);
                }
                if model.board().columns.len() >= self.max_columns {
                    return self.invalid(ValidationIssue::TooManyColumns {
                        max: self.max_columns,
                    });
                }
                let color = if color.trim().is_empty() {
                    self.config.defaults.column_color.clone()
                } else {
                    color
                };
                let toast = Toast::success(tf(
                    self.language,
                    Label::ColumnAdded,
                    &[("name", name.trim())],
                ));
                self.finish(model.add_column(&name, &color).map(Effect::ColumnAdded), toast)
            }
            Intent::EditColumn { id, name, color } => {
                if let Err(issue) = validate_column(&name, &color) {
                    return self.invalid(issue);
                }
                self.finish(
                    model
                        .edit_column(id, &name, &color)
                        .map(|_| Effect::ColumnChanged(id)),
                    Toast::success(self.label(Label::ColumnUpdated)),
                )
            }
            Intent::ReorderColumn { id, position } => self.finish(
                model
                    .reorder_column(id, position)
                    .map(|_| Effect::ColumnChanged(id)),
                Toast::success(self.label(Label::ColumnReordered)),
            ),
            Intent::AddCard { column_id, card } => {
                if let Err(issue) = validate_new_card(&card, &self.limits) {
                    return self.invalid(issue);
                }
                if let Some(outcome) = self.reject_if_full(model, column_id) {
                    return outcome;
                }
                self.finish(
                    model.add_card(column_id, card).map(Effect::CardAdded),
                    Toast::success(self.label(Label::CardAdded)),
                )
            }
            Intent::EditCard {
                column_id,
                card_id,
                update,
            } => {
                if let Err(issue) = validate_card_update(&update, &self.limits) {
                    return self.invalid(issue);
                }
                self.finish(
                    model
                        .edit_card(column_id, card_id, update)
                        .map(|_| Effect::CardChanged(card_id)),
                    Toast::success(self.label(Label::CardUpdated)),
                )
            }
            Intent::MoveCard { card_id, from, to } => {
                if from != to {
                    if let Some(outcome) = self.reject_if_full(model, to) {
                        return outcome;
                    }
                }
                self.finish(
                    model
                        .move_card(card_id, from, to)
                        .map(|_| Effect::CardChanged(card_id)),
                    Toast::success(self.label(Label::CardMoved)),
                )
            }
            Intent::DuplicateCard { column_id, card_id } => {
                if let Some(outcome) = self.reject_if_full(model, column_id) {
                    return outcome;
                }
                let suffix = self.label(Label::CopySuffix);
                self.finish(
                    model
                        .duplicate_card(column_id, card_id, suffix)
                        .map(Effect::CardAdded),
                    Toast::success(self.label(Label::CardDuplicated)),
                )
            }
            Intent::ToggleChecklistItem {
                column_id,
                card_id,
                item_id,
            } => self.finish(
                model
                    .toggle_checklist_item(column_id, card_id, item_id)
                    .map(|done| Effect::ChecklistToggled { item_id, done }),
                Toast::info(self.label(Label::ChecklistUpdated)),
            ),
            Intent::Import { payload } => self.finish(
                model.import_snapshot(&payload).map(|_| Effect::Imported),
                Toast::success(self.label(Label::Imported)),
            ),
            Intent::RemoveColumn { id } => {
                self.confirmation(model, PendingAction::RemoveColumn { id })
            }
            Intent::RemoveCard { column_id, card_id } => {
                self.confirmation(model, PendingAction::RemoveCard { column_id, card_id })
            }
        }
    }

    fn reject_if_full(&self, model: &BoardModel, column_id: ColumnId) -> Option<Outcome> {
        let column = model.column(column_id)?;
        (column.cards.len() >= self.max_cards_per_column).then(|| {
            self.invalid(ValidationIssue::ColumnFull {
                max: self.max_cards_per_column,
            })
        })
    }

    fn invalid(&self, issue: ValidationIssue) -> Outcome {
        let toast = match &issue {
            ValidationIssue::TooManyColumns { max } => Toast::danger(tf(
                self.language,
                Label::TooManyColumns,
                &[("max", max.to_string().as_str())],
            )),
            _ => self.error_toast(&BoardError::Validation(issue.to_string())),
        };
        tracing::debug!(%issue, "intent rejected by validation");
        Outcome::Rejected {
            toast,
            error: issue.into(),
        }
    }

    fn reject(&self, error: BoardError) -> Outcome {
        Outcome::Rejected {
            toast: self.error_toast(&error),
            error,
        }
    }

    fn finish(&self, result: BoardResult<Effect>, toast: Toast) -> Outcome {
        match result {
            Ok(effect) => Outcome::Applied { toast, effect },
            Err(error) => {
                tracing::warn!(%error, "intent failed");
                self.reject(error)
            }
        }
    }
}
