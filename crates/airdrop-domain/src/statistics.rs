use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::board::Board;
use crate::card::{CardPriority, CardStatus};

/// Aggregate counters over every card on the board.
///
/// Every status and priority key is present, with zero when no card has it. Cards
/// with no recognised priority are counted in `without_priority`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    pub by_status: BTreeMap<CardStatus, usize>,
    pub by_priority: BTreeMap<CardPriority, usize>,
    pub without_priority: usize,
    pub done: usize,
    pub in_progress: usize,
    pub overdue: usize,
}

impl Statistics {
    /// `today` is the single comparison point for the overdue count.
    pub fn compute(board: &Board, today: NaiveDate) -> Self {
        let mut by_status: BTreeMap<CardStatus, usize> =
            CardStatus::ALL.iter().map(|s| (*s, 0)).collect();
        let mut by_priority: BTreeMap<CardPriority, usize> =
            CardPriority::ALL.iter().map(|p| (*p, 0)).collect();
        let mut total = 0;
        let mut without_priority = 0;
        let mut overdue = 0;

        for card in board.cards() {
            total += 1;
            *by_status.entry(card.status).or_default() += 1;
            match card.priority {
                Some(priority) => *by_priority.entry(priority).or_default() += 1,
                None => without_priority += 1,
            }
            if card.is_overdue(today) {
                overdue += 1;
            }
        }

        let done = by_status[&CardStatus::Done];
        let in_progress = by_status[&CardStatus::InProgress];
        Self {
            total,
            by_status,
            by_priority,
            without_priority,
            done,
            in_progress,
            overdue,
        }
    }

    pub fn status_count(&self, status: CardStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn priority_count(&self, priority: CardPriority) -> usize {
        self.by_priority.get(&priority).copied().unwrap_or(0)
    }

    /// Share of done cards, rounded to whole percent.
    pub fn completion_percent(&self) -> u8 {
        percent(self.done, self.total)
    }
}

pub(crate) fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u8
}
