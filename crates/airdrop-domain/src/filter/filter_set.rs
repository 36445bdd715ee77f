//! The active filter settings of a board view.

use crate::card::{Card, CardPriority, CardStatus};

use super::card_filter::{CardFilter, CompositeFilter, PriorityFilter, StatusFilter, TextSearch};

/// Holds what to filter by, as opposed to the `CardFilter` implementations that
/// perform the filtering. All criteria are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub query: String,
    pub status: Option<CardStatus>,
    pub priority: Option<CardPriority>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_status(mut self, status: CardStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: CardPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn has_active_filters(&self) -> bool {
        !self.query.trim().is_empty() || self.status.is_some() || self.priority.is_some()
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.status = None;
        self.priority = None;
    }

    /// Steps the status filter through none → each status → none.
    pub fn cycle_status(&mut self) {
        self.status = cycle(self.status, &CardStatus::ALL);
    }

    pub fn cycle_priority(&mut self) {
        self.priority = cycle(self.priority, &CardPriority::ALL);
    }

    pub fn to_filter(&self) -> CompositeFilter {
        let mut filter = CompositeFilter::new();
        if !self.query.trim().is_empty() {
            filter = filter.with_filter(Box::new(TextSearch::new(self.query.clone())));
        }
        if let Some(status) = self.status {
            filter = filter.with_filter(Box::new(StatusFilter::new(status)));
        }
        if let Some(priority) = self.priority {
            filter = filter.with_filter(Box::new(PriorityFilter::new(priority)));
        }
        filter
    }

    pub fn matches(&self, card: &Card) -> bool {
        self.to_filter().matches(card)
    }
}

fn cycle<T: Copy + PartialEq>(current: Option<T>, all: &[T]) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => all
            .iter()
            .position(|v| *v == value)
            .and_then(|i| all.get(i + 1))
            .copied(),
    }
}
