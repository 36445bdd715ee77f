use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::field_update::{CardUpdate, NewCard};

pub type CardId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum CardStatus {
    #[default]
    InProgress,
    Done,
    Waiting,
    Rejected,
}

impl CardStatus {
    pub const ALL: [CardStatus; 4] = [
        CardStatus::InProgress,
        CardStatus::Done,
        CardStatus::Waiting,
        CardStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::InProgress => "InProgress",
            CardStatus::Done => "Done",
            CardStatus::Waiting => "Waiting",
            CardStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "inprogress" | "progress" | "doing" => Ok(CardStatus::InProgress),
            "done" | "completed" => Ok(CardStatus::Done),
            "waiting" | "pending" => Ok(CardStatus::Waiting),
            "rejected" => Ok(CardStatus::Rejected),
            _ => Err(format!(
                "Invalid status '{}'. Use: in-progress, done, waiting, rejected",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardPriority {
    High,
    Medium,
    Low,
}

impl CardPriority {
    pub const ALL: [CardPriority; 3] = [CardPriority::High, CardPriority::Medium, CardPriority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardPriority::High => "High",
            CardPriority::Medium => "Medium",
            CardPriority::Low => "Low",
        }
    }
}

impl fmt::Display for CardPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "high" => Ok(CardPriority::High),
            "medium" => Ok(CardPriority::Medium),
            "low" => Ok(CardPriority::Low),
            _ => Err(format!("Invalid priority '{}'. Use: high, medium, low", s)),
        }
    }
}

fn normalize_token(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: u32,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl ChecklistItem {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            done: false,
        }
    }
}

/// Blank links are stored as no link, matching how saved documents read back.
fn normalize_link(link: Option<String>) -> Option<String> {
    link.map(|l| l.trim().to_string()).filter(|l| !l.is_empty())
}

/// Builds a checklist from plain item texts, numbering items from 1.
pub fn checklist_from_texts<I, S>(texts: I) -> Vec<ChecklistItem>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .enumerate()
        .map(|(i, text)| ChecklistItem::new(i as u32 + 1, text))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::status")]
    pub status: CardStatus,
    /// Absent or unrecognised in imported data maps to `None`.
    #[serde(default, deserialize_with = "lenient::priority")]
    pub priority: Option<CardPriority>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::non_empty")]
    pub link: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Card {
    pub fn new(id: CardId, new_card: NewCard, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new_card.title.trim().to_string(),
            description: new_card.description,
            status: new_card.status.unwrap_or_default(),
            priority: Some(new_card.priority.unwrap_or(CardPriority::Medium)),
            due_date: new_card.due_date,
            link: normalize_link(new_card.link),
            tags: crate::tag::normalize_tags(new_card.tags),
            checklist: new_card.checklist,
            notes: new_card.notes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: CardUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = Some(priority);
        }
        update.due_date.apply_to(&mut self.due_date);
        update.link.apply_to(&mut self.link);
        self.link = normalize_link(self.link.take());
        if let Some(tags) = update.tags {
            self.tags = crate::tag::normalize_tags(tags);
        }
        if let Some(checklist) = update.checklist {
            self.checklist = checklist;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        self.touch(now);
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn is_done(&self) -> bool {
        self.status == CardStatus::Done
    }

    /// Due strictly before `today` and not yet done.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_done() && self.due_date.is_some_and(|due| due < today)
    }

    pub fn checklist_done(&self) -> usize {
        self.checklist.iter().filter(|item| item.done).count()
    }

    /// Flips the checklist item and returns its new state.
    pub fn toggle_checklist_item(&mut self, item_id: u32, now: DateTime<Utc>) -> Option<bool> {
        let item = self.checklist.iter_mut().find(|item| item.id == item_id)?;
        item.done = !item.done;
        let done = item.done;
        self.touch(now);
        Some(done)
    }

    pub fn duplicate(&self, id: CardId, title_suffix: &str, now: DateTime<Utc>) -> Self {
        let mut copy = self.clone();
        copy.id = id;
        copy.title = format!("{}{}", self.title, title_suffix);
        for item in &mut copy.checklist {
            item.done = false;
        }
        copy.created_at = now;
        copy.updated_at = now;
        copy
    }
}

/// Deserializers that degrade unknown or empty values instead of failing the whole document.
mod lenient {
    use super::{CardPriority, CardStatus};
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer};

    pub fn status<'de, D: Deserializer<'de>>(d: D) -> Result<CardStatus, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.and_then(|s| s.parse().ok()).unwrap_or_default())
    }

    pub fn priority<'de, D: Deserializer<'de>>(d: D) -> Result<Option<CardPriority>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.and_then(|s| s.parse().ok()))
    }

    pub fn date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.and_then(|s| parse_date(s.trim())))
    }

    pub fn non_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.filter(|s| !s.trim().is_empty()))
    }

    fn parse_date(s: &str) -> Option<NaiveDate> {
        if s.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_new_card_defaults() {
        let card = Card::new(1, NewCard::titled("  Claim LayerZero  "), now());
        assert_eq!(card.title, "Claim LayerZero");
        assert_eq!(card.status, CardStatus::InProgress);
        assert_eq!(card.priority, Some(CardPriority::Medium));
        assert_eq!(card.created_at, card.updated_at);
    }

    #[test]
    fn test_status_parse_accepts_cli_spellings() {
        assert_eq!("in-progress".parse::<CardStatus>().unwrap(), CardStatus::InProgress);
        assert_eq!("InProgress".parse::<CardStatus>().unwrap(), CardStatus::InProgress);
        assert_eq!("DONE".parse::<CardStatus>().unwrap(), CardStatus::Done);
        assert!("archived".parse::<CardStatus>().is_err());
    }

    #[test]
    fn test_overdue_requires_unfinished_and_past_due() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut card = Card::new(1, NewCard::titled("a"), now());
        card.due_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert!(card.is_overdue(today));
        card.status = CardStatus::Done;
        assert!(!card.is_overdue(today));
        card.status = CardStatus::Waiting;
        card.due_date = Some(today);
        assert!(!card.is_overdue(today));
    }

    #[test]
    fn test_lenient_deserialize_of_legacy_card() {
        let json = r#"{
            "id": 7, "title": "Old", "status": "Em andamento", "priority": "Urgent",
            "dueDate": "", "link": "", "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.status, CardStatus::InProgress);
        assert_eq!(card.priority, None);
        assert_eq!(card.due_date, None);
        assert_eq!(card.link, None);
        assert!(card.tags.is_empty());
    }

    #[test]
    fn test_duplicate_resets_checklist() {
        let mut card = Card::new(1, NewCard::titled("Task"), now());
        card.checklist = checklist_from_texts(["bridge", "swap"]);
        card.checklist[0].done = true;
        let copy = card.duplicate(2, " (copy)", now());
        assert_eq!(copy.id, 2);
        assert_eq!(copy.title, "Task (copy)");
        assert!(copy.checklist.iter().all(|i| !i.done));
        assert!(card.checklist[0].done);
    }

    #[test]
    fn test_toggle_checklist_item() {
        let mut card = Card::new(1, NewCard::titled("Task"), now());
        card.checklist = checklist_from_texts(["one", " ", "two"]);
        assert_eq!(card.checklist.len(), 2);
        assert_eq!(card.toggle_checklist_item(2, now()), Some(true));
        assert_eq!(card.checklist_done(), 1);
        assert_eq!(card.toggle_checklist_item(9, now()), None);
    }
}
