//! Editable drafts behind the column and card popups.

use airdrop_core::InputState;
use airdrop_domain::column::next_palette_color;
use airdrop_domain::tag::parse_tags;
use airdrop_domain::{
    Card, CardId, CardPriority, CardStatus, CardUpdate, ChecklistItem, Column, ColumnId, Intent,
    Label, NewCard,
};
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const CHECKLIST_SEPARATOR: char = ';';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnField {
    Name,
    Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnForm {
    pub editing: Option<ColumnId>,
    pub name: InputState,
    pub color: InputState,
    pub focus: ColumnField,
}

impl ColumnForm {
    pub fn create(color: &str) -> Self {
        Self {
            editing: None,
            name: InputState::new(),
            color: InputState::with_text(color),
            focus: ColumnField::Name,
        }
    }

    pub fn edit(column: &Column) -> Self {
        Self {
            editing: Some(column.id),
            name: InputState::with_text(column.name.clone()),
            color: InputState::with_text(column.color.clone()),
            focus: ColumnField::Name,
        }
    }

    pub fn title(&self) -> Label {
        if self.editing.is_some() {
            Label::EditColumn
        } else {
            Label::NewColumn
        }
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        match self.focus {
            ColumnField::Name => &mut self.name,
            ColumnField::Color => &mut self.color,
        }
    }

    pub fn toggle_field(&mut self) {
        self.focus = match self.focus {
            ColumnField::Name => ColumnField::Color,
            ColumnField::Color => ColumnField::Name,
        };
    }

    /// Steps the colour through the preset palette.
    pub fn cycle_color(&mut self) {
        let next = next_palette_color(self.color.as_str());
        self.color.set(next);
    }

    pub fn into_intent(self) -> Intent {
        let name = self.name.as_str().to_string();
        let color = self.color.as_str().trim().to_string();
        match self.editing {
            Some(id) => Intent::EditColumn { id, name, color },
            None => Intent::AddColumn { name, color },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Title,
    Description,
    Status,
    Priority,
    Due,
    Link,
    Tags,
    Checklist,
    Notes,
}

impl CardField {
    pub const ALL: [CardField; 9] = [
        CardField::Title,
        CardField::Description,
        CardField::Status,
        CardField::Priority,
        CardField::Due,
        CardField::Link,
        CardField::Tags,
        CardField::Checklist,
        CardField::Notes,
    ];

    pub fn label(self) -> Label {
        match self {
            CardField::Title => Label::CardTitle,
            CardField::Description => Label::CardDescription,
            CardField::Status => Label::Status,
            CardField::Priority => Label::Priority,
            CardField::Due => Label::CardDue,
            CardField::Link => Label::CardLink,
            CardField::Tags => Label::CardTags,
            CardField::Checklist => Label::Checklist,
            CardField::Notes => Label::Notes,
        }
    }

    pub fn is_choice(self) -> bool {
        matches!(self, CardField::Status | CardField::Priority)
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardForm {
    pub column_id: ColumnId,
    pub card_id: Option<CardId>,
    pub title: InputState,
    pub description: InputState,
    pub status: CardStatus,
    pub priority: Option<CardPriority>,
    pub due: InputState,
    pub link: InputState,
    pub tags: InputState,
    /// Item texts separated by `;`.
    pub checklist: InputState,
    pub notes: InputState,
    pub focus: CardField,
    existing_checklist: Vec<ChecklistItem>,
}

impl CardForm {
    pub fn create(column_id: ColumnId) -> Self {
        Self {
            column_id,
            card_id: None,
            title: InputState::new(),
            description: InputState::new(),
            status: CardStatus::InProgress,
            priority: Some(CardPriority::Medium),
            due: InputState::new(),
            link: InputState::new(),
            tags: InputState::new(),
            checklist: InputState::new(),
            notes: InputState::new(),
            focus: CardField::Title,
            existing_checklist: Vec::new(),
        }
    }

    pub fn edit(column_id: ColumnId, card: &Card) -> Self {
        let checklist = card
            .checklist
            .iter()
            .map(|item| item.text.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            column_id,
            card_id: Some(card.id),
            title: InputState::with_text(card.title.clone()),
            description: InputState::with_text(card.description.clone()),
            status: card.status,
            priority: card.priority,
            due: InputState::with_text(
                card.due_date
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_default(),
            ),
            link: InputState::with_text(card.link.clone().unwrap_or_default()),
            tags: InputState::with_text(card.tags.join(", ")),
            checklist: InputState::with_text(checklist),
            notes: InputState::with_text(card.notes.clone()),
            focus: CardField::Title,
            existing_checklist: card.checklist.clone(),
        }
    }

    pub fn title_label(&self) -> Label {
        if self.card_id.is_some() {
            Label::EditCard
        } else {
            Label::NewCard
        }
    }

    pub fn input(&self, field: CardField) -> Option<&InputState> {
        match field {
            CardField::Title => Some(&self.title),
            CardField::Description => Some(&self.description),
            CardField::Due => Some(&self.due),
            CardField::Link => Some(&self.link),
            CardField::Tags => Some(&self.tags),
            CardField::Checklist => Some(&self.checklist),
            CardField::Notes => Some(&self.notes),
            CardField::Status | CardField::Priority => None,
        }
    }

    /// The text buffer under the cursor, if the focused field is free text.
    pub fn input_mut(&mut self) -> Option<&mut InputState> {
        match self.focus {
            CardField::Title => Some(&mut self.title),
            CardField::Description => Some(&mut self.description),
            CardField::Due => Some(&mut self.due),
            CardField::Link => Some(&mut self.link),
            CardField::Tags => Some(&mut self.tags),
            CardField::Checklist => Some(&mut self.checklist),
            CardField::Notes => Some(&mut self.notes),
            CardField::Status | CardField::Priority => None,
        }
    }

    pub fn next_field(&mut self) {
        let next = (self.focus.index() + 1) % CardField::ALL.len();
        self.focus = CardField::ALL[next];
    }

    pub fn prev_field(&mut self) {
        let len = CardField::ALL.len();
        let prev = (self.focus.index() + len - 1) % len;
        self.focus = CardField::ALL[prev];
    }

    /// Steps status or priority, whichever is focused.
    pub fn cycle_choice(&mut self, forward: bool) {
        match self.focus {
            CardField::Status => {
                self.status = step(&CardStatus::ALL, Some(self.status), forward)
                    .unwrap_or(CardStatus::InProgress);
            }
            CardField::Priority => {
                self.priority = step(&CardPriority::ALL, self.priority, forward);
            }
            _ => {}
        }
    }

    /// Builds the draft; fails only when the due date does not parse.
    pub fn to_new_card(&self) -> Result<NewCard, String> {
        let due_text = self.due.as_str().trim();
        let due_date = if due_text.is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(due_text, DATE_FORMAT)
                    .map_err(|_| format!("'{}' is not a YYYY-MM-DD date", due_text))?,
            )
        };
        let link = self.link.as_str().trim();
        Ok(NewCard {
            title: self.title.as_str().to_string(),
            description: self.description.as_str().to_string(),
            status: Some(self.status),
            priority: self.priority,
            due_date,
            link: (!link.is_empty()).then(|| link.to_string()),
            tags: parse_tags(self.tags.as_str()),
            checklist: merge_checklist(&self.existing_checklist, self.checklist.as_str()),
            notes: self.notes.as_str().to_string(),
        })
    }

    pub fn into_intent(self) -> Result<Intent, String> {
        let card = self.to_new_card()?;
        Ok(match self.card_id {
            Some(card_id) => Intent::EditCard {
                column_id: self.column_id,
                card_id,
                update: CardUpdate::replace_all(card),
            },
            None => Intent::AddCard {
                column_id: self.column_id,
                card,
            },
        })
    }
}

fn step<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let len = all.len();
    let idx = match current.and_then(|c| all.iter().position(|x| *x == c)) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    all.get(idx).copied()
}

/// Rebuilds a checklist from edited text, keeping the id and done flag of
/// items whose text is unchanged.
pub fn merge_checklist(existing: &[ChecklistItem], text: &str) -> Vec<ChecklistItem> {
    let mut unused: Vec<&ChecklistItem> = existing.iter().collect();
    let mut next_id = existing.iter().map(|i| i.id).max().unwrap_or(0);
    text.split(CHECKLIST_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|text| {
            match unused.iter().position(|item| item.text == text) {
                Some(pos) => unused.remove(pos).clone(),
                None => {
                    next_id += 1;
                    ChecklistItem::new(next_id, text)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_merge_checklist_keeps_done_items() {
        let mut done = ChecklistItem::new(1, "bridge");
        done.done = true;
        let existing = vec![done, ChecklistItem::new(2, "swap")];

        let merged = merge_checklist(&existing, "bridge; stake ;");

        assert_eq!(merged.len(), 2);
        assert!(merged[0].done);
        assert_eq!(merged[0].id, 1);
        assert_eq!(merged[1].text, "stake");
        assert_eq!(merged[1].id, 3);
        assert!(!merged[1].done);
    }

    #[test]
    fn test_invalid_due_date_is_reported() {
        let mut form = CardForm::create(1);
        form.title.set("Claim");
        form.due.set("31/12/2024");
        assert!(form.to_new_card().is_err());

        form.due.set("2024-12-31");
        let card = form.to_new_card().unwrap();
        assert_eq!(card.due_date, NaiveDate::from_ymd_opt(2024, 12, 31));
    }

    #[test]
    fn test_edit_form_round_trips_card() {
        let mut draft = NewCard::titled("LayerZero");
        draft.tags = vec!["DeFi".into(), "L0".into()];
        draft.link = Some("https://layerzero.network".into());
        let card = Card::new(7, draft, Utc::now());

        let form = CardForm::edit(3, &card);
        let Intent::EditCard { column_id, card_id, update } = form.into_intent().unwrap() else {
            panic!("expected an edit intent");
        };
        assert_eq!((column_id, card_id), (3, 7));
        assert_eq!(update.tags, Some(vec!["DeFi".to_string(), "L0".to_string()]));
        assert_eq!(update.title.as_deref(), Some("LayerZero"));
    }

    #[test]
    fn test_field_cycling_wraps() {
        let mut form = CardForm::create(1);
        form.prev_field();
        assert_eq!(form.focus, CardField::Notes);
        form.next_field();
        assert_eq!(form.focus, CardField::Title);

        form.focus = CardField::Priority;
        form.cycle_choice(true);
        assert_eq!(form.priority, Some(CardPriority::Low));
        assert!(form.input_mut().is_none());
    }

    #[test]
    fn test_column_form_intent() {
        let mut form = ColumnForm::create("#2563eb");
        form.name.set("Mainnet");
        form.cycle_color();
        assert_ne!(form.color.as_str(), "#2563eb");
        assert!(matches!(form.into_intent(), Intent::AddColumn { name, .. } if name == "Mainnet"));
    }
}
