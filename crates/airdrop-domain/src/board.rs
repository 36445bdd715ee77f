use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::card::{Card, CardId};
use crate::column::{Column, ColumnId};

/// The whole persisted board: an ordered collection of columns and their cards.
///
/// Serializes as a bare JSON array of columns, which is also the export format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn column_mut(&mut self, id: ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    /// Columns in display order (`order` ascending, id as tiebreak).
    pub fn sorted_columns(&self) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self.columns.iter().collect();
        columns.sort_by_key(|c| (c.order, c.id));
        columns
    }

    pub fn find_card(&self, card_id: CardId) -> Option<(&Column, &Card)> {
        self.columns
            .iter()
            .find_map(|column| column.card(card_id).map(|card| (column, card)))
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.columns.iter().flat_map(|c| c.cards.iter())
    }

    pub fn total_cards(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }

    pub fn max_column_id(&self) -> ColumnId {
        self.columns.iter().map(|c| c.id).max().unwrap_or(0)
    }

    pub fn max_card_id(&self) -> CardId {
        self.cards().map(|c| c.id).max().unwrap_or(0)
    }

    /// Renumbers `order` 1..=n following the current display order.
    pub fn normalize_order(&mut self) {
        let ids: Vec<ColumnId> = self.sorted_columns().iter().map(|c| c.id).collect();
        for (index, id) in ids.into_iter().enumerate() {
            if let Some(column) = self.column_mut(id) {
                column.order = index as i32 + 1;
            }
        }
    }

    /// First duplicated id found, column ids checked before card ids.
    pub fn find_duplicate_id(&self) -> Option<DuplicateId> {
        let mut columns = HashSet::new();
        for column in &self.columns {
            if !columns.insert(column.id) {
                return Some(DuplicateId::Column(column.id));
            }
        }
        let mut cards = HashSet::new();
        for card in self.cards() {
            if !cards.insert(card.id) {
                return Some(DuplicateId::Card(card.id));
            }
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateId {
    Column(ColumnId),
    Card(CardId),
}
