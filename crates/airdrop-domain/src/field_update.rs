use chrono::NaiveDate;

use crate::card::{CardPriority, CardStatus, ChecklistItem};

/// Represents a field update operation for partial updates
///
/// This type provides a clear, three-state pattern for updating optional fields:
/// - `NoChange`: Field keeps its existing value
/// - `Set(value)`: Field is updated to the provided value
/// - `Clear`: Field is cleared (set to None)
///
/// # Example
///
/// ```
/// use airdrop_domain::FieldUpdate;
///
/// let mut link = Some("https://old.example".to_string());
/// FieldUpdate::<String>::Clear.apply_to(&mut link);
/// assert_eq!(link, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    NoChange,
    Set(T),
    Clear,
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// - Some(value) becomes Set(value)
    /// - None becomes Clear
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}

/// Fields supplied when creating a card. Omitted status and priority fall back to
/// `InProgress` and `Medium`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCard {
    pub title: String,
    pub description: String,
    pub status: Option<CardStatus>,
    pub priority: Option<CardPriority>,
    pub due_date: Option<NaiveDate>,
    pub link: Option<String>,
    pub tags: Vec<String>,
    pub checklist: Vec<ChecklistItem>,
    pub notes: String,
}

impl NewCard {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Partial card edit; `None` and `NoChange` leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<CardStatus>,
    pub priority: Option<CardPriority>,
    pub due_date: FieldUpdate<NaiveDate>,
    pub link: FieldUpdate<String>,
    pub tags: Option<Vec<String>>,
    pub checklist: Option<Vec<ChecklistItem>>,
    pub notes: Option<String>,
}

impl CardUpdate {
    /// Replace every field, as a full edit form does.
    pub fn replace_all(card: NewCard) -> Self {
        Self {
            title: Some(card.title),
            description: Some(card.description),
            status: card.status,
            priority: card.priority,
            due_date: card.due_date.into(),
            link: card.link.filter(|l| !l.trim().is_empty()).into(),
            tags: Some(card.tags),
            checklist: Some(card.checklist),
            notes: Some(card.notes),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
