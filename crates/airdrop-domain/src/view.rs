//! Pure projection of the board into what a frontend draws.
//!
//! Nothing here is stored; every redraw recomputes the view from the current
//! board and filter set.

use chrono::NaiveDate;
use serde::Serialize;

use crate::board::Board;
use crate::card::{Card, CardId, CardPriority, CardStatus};
use crate::column::{Column, ColumnId};
use crate::filter::{CardFilter, FilterSet};
use crate::statistics::{percent, Statistics};
use crate::tag::{tag_color, TagColor};

/// Visual variant of a card, derived from its priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CardVariant {
    Red,
    Orange,
    Green,
    Blue,
}

impl CardVariant {
    pub fn for_priority(priority: Option<CardPriority>) -> Self {
        match priority {
            Some(CardPriority::High) => CardVariant::Red,
            Some(CardPriority::Medium) => CardVariant::Orange,
            Some(CardPriority::Low) => CardVariant::Green,
            None => CardVariant::Blue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagChip {
    pub text: String,
    pub color: TagColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DueInfo {
    pub date: NaiveDate,
    pub days_left: i64,
    pub overdue: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistProgress {
    pub done: usize,
    pub total: usize,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: CardId,
    pub column_id: ColumnId,
    pub title: String,
    pub description: String,
    pub notes: String,
    pub status: CardStatus,
    pub priority: Option<CardPriority>,
    pub variant: CardVariant,
    pub tags: Vec<TagChip>,
    pub due: Option<DueInfo>,
    pub link: Option<String>,
    pub checklist: Option<ChecklistProgress>,
}

impl CardView {
    pub fn project(card: &Card, column_id: ColumnId, today: NaiveDate) -> Self {
        Self {
            id: card.id,
            column_id,
            title: card.title.clone(),
            description: card.description.clone(),
            notes: card.notes.clone(),
            status: card.status,
            priority: card.priority,
            variant: CardVariant::for_priority(card.priority),
            tags: card
                .tags
                .iter()
                .map(|tag| TagChip {
                    text: tag.clone(),
                    color: tag_color(tag),
                })
                .collect(),
            due: card.due_date.map(|date| DueInfo {
                date,
                days_left: (date - today).num_days(),
                overdue: card.is_overdue(today),
            }),
            link: card.link.clone(),
            checklist: checklist_progress(card),
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.due.is_some_and(|d| d.overdue)
    }
}

/// `None` when the card has no checklist.
pub fn checklist_progress(card: &Card) -> Option<ChecklistProgress> {
    if card.checklist.is_empty() {
        return None;
    }
    let done = card.checklist_done();
    let total = card.checklist.len();
    Some(ChecklistProgress {
        done,
        total,
        percent: percent(done, total),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView {
    pub id: ColumnId,
    pub name: String,
    pub color: String,
    pub order: i32,
    pub cards: Vec<CardView>,
    /// Card count before filtering.
    pub total_cards: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
    pub visible_cards: usize,
    pub total_cards: usize,
}

impl BoardView {
    pub fn column(&self, id: ColumnId) -> Option<&ColumnView> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn card_ids(&self) -> Vec<CardId> {
        self.columns
            .iter()
            .flat_map(|c| c.cards.iter().map(|card| card.id))
            .collect()
    }
}

/// Columns ordered by `order`, each holding the cards that pass every filter.
pub fn visible_board(board: &Board, filters: &FilterSet, today: NaiveDate) -> BoardView {
    let filter = filters.to_filter();
    let columns: Vec<ColumnView> = board
        .sorted_columns()
        .into_iter()
        .map(|column| project_column(column, &filter, today))
        .collect();
    let visible_cards = columns.iter().map(|c| c.cards.len()).sum();
    BoardView {
        columns,
        visible_cards,
        total_cards: board.total_cards(),
    }
}

fn project_column(column: &Column, filter: &dyn CardFilter, today: NaiveDate) -> ColumnView {
    ColumnView {
        id: column.id,
        name: column.name.clone(),
        color: column.color.clone(),
        order: column.order,
        cards: column
            .cards
            .iter()
            .filter(|card| filter.matches(card))
            .map(|card| CardView::project(card, column.id, today))
            .collect(),
        total_cards: column.cards.len(),
    }
}

/// Counters plus the series the dashboard charts draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub statistics: Statistics,
    pub status_series: Vec<(CardStatus, usize)>,
    pub priority_series: Vec<(CardPriority, usize)>,
    pub completion_percent: u8,
}

pub fn dashboard(board: &Board, today: NaiveDate) -> Dashboard {
    let statistics = Statistics::compute(board, today);
    let status_series = CardStatus::ALL
        .iter()
        .map(|s| (*s, statistics.status_count(*s)))
        .collect();
    let priority_series = CardPriority::ALL
        .iter()
        .map(|p| (*p, statistics.priority_count(*p)))
        .collect();
    let completion_percent = statistics.completion_percent();
    Dashboard {
        statistics,
        status_series,
        priority_series,
        completion_percent,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventTone {
    Done,
    Overdue,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub card_id: CardId,
    pub column_id: ColumnId,
    pub title: String,
    pub date: NaiveDate,
    pub status: CardStatus,
    pub tone: EventTone,
}

/// Cards with a due date, ordered by date then title.
pub fn calendar_events(board: &Board, today: NaiveDate) -> Vec<CalendarEvent> {
    let mut events: Vec<CalendarEvent> = board
        .columns
        .iter()
        .flat_map(|column| {
            column.cards.iter().filter_map(move |card| {
                let date = card.due_date?;
                let tone = if card.is_done() {
                    EventTone::Done
                } else if card.is_overdue(today) {
                    EventTone::Overdue
                } else {
                    EventTone::Upcoming
                };
                Some(CalendarEvent {
                    card_id: card.id,
                    column_id: column.id,
                    title: card.title.clone(),
                    date,
                    status: card.status,
                    tone,
                })
            })
        })
        .collect();
    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));
    events
}

/// Groups already-sorted events by day.
pub fn agenda(events: &[CalendarEvent]) -> Vec<(NaiveDate, Vec<&CalendarEvent>)> {
    let mut days: Vec<(NaiveDate, Vec<&CalendarEvent>)> = Vec::new();
    for event in events {
        match days.last_mut() {
            Some((date, bucket)) if *date == event.date => bucket.push(event),
            _ => days.push((event.date, vec![event])),
        }
    }
    days
}
