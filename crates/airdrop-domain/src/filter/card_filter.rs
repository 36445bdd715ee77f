//! Card filter implementations.

use crate::card::{Card, CardPriority, CardStatus};

/// Trait for filtering cards by various criteria.
pub trait CardFilter {
    /// Returns true if the card matches the filter criteria.
    fn matches(&self, card: &Card) -> bool;
}

/// Case-insensitive substring search over title, description, notes and tags.
pub struct TextSearch {
    query: String,
}

impl TextSearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().trim().to_lowercase(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl CardFilter for TextSearch {
    fn matches(&self, card: &Card) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let hit = |text: &str| text.to_lowercase().contains(&self.query);
        hit(&card.title)
            || hit(&card.description)
            || hit(&card.notes)
            || card.tags.iter().any(|tag| hit(tag))
    }
}

pub struct StatusFilter {
    status: CardStatus,
}

impl StatusFilter {
    pub fn new(status: CardStatus) -> Self {
        Self { status }
    }
}

impl CardFilter for StatusFilter {
    fn matches(&self, card: &Card) -> bool {
        card.status == self.status
    }
}

/// Cards without a recognised priority never match.
pub struct PriorityFilter {
    priority: CardPriority,
}

impl PriorityFilter {
    pub fn new(priority: CardPriority) -> Self {
        Self { priority }
    }
}

impl CardFilter for PriorityFilter {
    fn matches(&self, card: &Card) -> bool {
        card.priority == Some(self.priority)
    }
}

/// Combine multiple filters with AND logic.
///
/// A card matches only if it passes all filters.
#[derive(Default)]
pub struct CompositeFilter {
    filters: Vec<Box<dyn CardFilter>>,
}

impl CompositeFilter {
    /// Create an empty composite filter (matches all cards).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Box<dyn CardFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl CardFilter for CompositeFilter {
    fn matches(&self, card: &Card) -> bool {
        self.filters.iter().all(|f| f.matches(card))
    }
}
