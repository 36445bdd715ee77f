//! The board model: the only writer of board state.
//!
//! Every mutation runs against the in-memory board, is persisted synchronously
//! through [`BoardStorage`], and only then announced to observers. When the save
//! fails the board is restored to its previous state and no observer hears about it.

use airdrop_core::{BoardError, BoardResult, Clock};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

use crate::board::{Board, DuplicateId};
use crate::card::{Card, CardId};
use crate::column::{Column, ColumnId};
use crate::field_update::{CardUpdate, NewCard};
use crate::statistics::Statistics;

/// Where the model reads and writes the board document.
pub trait BoardStorage {
    /// Never fails: missing or unreadable data yields an empty board.
    fn load(&self) -> Board;
    fn save(&self, board: &Board) -> BoardResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardChange {
    ColumnAdded(ColumnId),
    ColumnEdited(ColumnId),
    ColumnReordered(ColumnId),
    ColumnRemoved { column_id: ColumnId, cards_removed: usize },
    CardAdded { column_id: ColumnId, card_id: CardId },
    CardEdited { column_id: ColumnId, card_id: CardId },
    CardMoved { card_id: CardId, from: ColumnId, to: ColumnId },
    CardRemoved { column_id: ColumnId, card_id: CardId },
    Imported,
    Reloaded,
}

/// Payload handed to observers after a change has been persisted.
#[derive(Debug, Clone, Copy)]
pub struct BoardEvent<'a> {
    pub change: &'a BoardChange,
    pub board: &'a Board,
}

pub trait BoardObserver {
    fn on_board_changed(&mut self, event: BoardEvent<'_>);
}

impl<F> BoardObserver for F
where
    F: FnMut(BoardEvent<'_>),
{
    fn on_board_changed(&mut self, event: BoardEvent<'_>) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct BoardModel {
    board: Board,
    storage: Box<dyn BoardStorage>,
    clock: Arc<dyn Clock>,
    observers: Vec<(SubscriptionId, Box<dyn BoardObserver>)>,
    next_subscription: u64,
    column_high_water: ColumnId,
    card_high_water: CardId,
}

impl BoardModel {
    /// Loads the board from storage once.
    pub fn new(storage: Box<dyn BoardStorage>, clock: Arc<dyn Clock>) -> Self {
        let board = storage.load();
        tracing::debug!(
            columns = board.columns.len(),
            cards = board.total_cards(),
            "board loaded"
        );
        Self {
            column_high_water: board.max_column_id(),
            card_high_water: board.max_card_id(),
            board,
            storage,
            clock,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Columns in display order.
    pub fn columns(&self) -> Vec<&Column> {
        self.board.sorted_columns()
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.board.column(id)
    }

    pub fn card(&self, card_id: CardId) -> Option<(ColumnId, &Card)> {
        self.board
            .find_card(card_id)
            .map(|(column, card)| (column.id, card))
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn subscribe(&mut self, observer: impl BoardObserver + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn add_column(&mut self, name: &str, color: &str) -> BoardResult<ColumnId> {
        let id = self.board.max_column_id().max(self.column_high_water) + 1;
        let column_id = self.commit(|board, _| {
            let order = board.columns.len() as i32 + 1;
            board.columns.push(Column::new(id, name, color, order));
            Ok((id, BoardChange::ColumnAdded(id)))
        })?;
        self.column_high_water = column_id;
        Ok(column_id)
    }

    /// A blank colour keeps the current one.
    pub fn edit_column(&mut self, id: ColumnId, name: &str, color: &str) -> BoardResult<()> {
        self.commit(|board, _| {
            let column = board
                .column_mut(id)
                .ok_or_else(|| BoardError::not_found(format!("column {}", id)))?;
            column.name = name.trim().to_string();
            if !color.trim().is_empty() {
                column.color = color.trim().to_string();
            }
            Ok(((), BoardChange::ColumnEdited(id)))
        })
    }

    /// Moves the column to 1-based display position `position` (clamped) and
    /// renumbers every column's `order`.
    pub fn reorder_column(&mut self, id: ColumnId, position: usize) -> BoardResult<()> {
        self.commit(|board, _| {
            let mut ids: Vec<ColumnId> = board.sorted_columns().iter().map(|c| c.id).collect();
            let from = ids
                .iter()
                .position(|c| *c == id)
                .ok_or_else(|| BoardError::not_found(format!("column {}", id)))?;
            ids.remove(from);
            let to = position.clamp(1, ids.len() + 1) - 1;
            ids.insert(to, id);
            for (index, column_id) in ids.into_iter().enumerate() {
                if let Some(column) = board.column_mut(column_id) {
                    column.order = index as i32 + 1;
                }
            }
            Ok(((), BoardChange::ColumnReordered(id)))
        })
    }

    /// Removes the column together with all of its cards.
    pub fn remove_column(&mut self, id: ColumnId) -> BoardResult<Column> {
        self.commit(|board, _| {
            let index = board
                .columns
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| BoardError::not_found(format!("column {}", id)))?;
            let column = board.columns.remove(index);
            let change = BoardChange::ColumnRemoved {
                column_id: id,
                cards_removed: column.cards.len(),
            };
            Ok((column, change))
        })
    }

    pub fn add_card(&mut self, column_id: ColumnId, new_card: NewCard) -> BoardResult<CardId> {
        let id = self.next_card_id();
        let card_id = self.commit(|board, now| {
            let column = board
                .column_mut(column_id)
                .ok_or_else(|| BoardError::not_found(format!("column {}", column_id)))?;
            column.cards.push(Card::new(id, new_card, now));
            Ok((id, BoardChange::CardAdded { column_id, card_id: id }))
        })?;
        self.card_high_water = card_id;
        Ok(card_id)
    }

    pub fn edit_card(
        &mut self,
        column_id: ColumnId,
        card_id: CardId,
        update: CardUpdate,
    ) -> BoardResult<()> {
        self.commit(|board, now| {
            let card = card_in(board, column_id, card_id)?;
            card.apply(update, now);
            Ok(((), BoardChange::CardEdited { column_id, card_id }))
        })
    }

    /// Relocates the card to the end of `to`. Moving within the same column is a
    /// successful no-op.
    pub fn move_card(&mut self, card_id: CardId, from: ColumnId, to: ColumnId) -> BoardResult<()> {
        if self.board.column(to).is_none() {
            return Err(BoardError::not_found(format!("column {}", to)));
        }
        if from == to {
            return self
                .board
                .column(from)
                .and_then(|c| c.card(card_id))
                .map(|_| ())
                .ok_or_else(|| BoardError::not_found(format!("card {} in column {}", card_id, from)));
        }
        self.commit(|board, now| {
            let mut card = board
                .column_mut(from)
                .ok_or_else(|| BoardError::not_found(format!("column {}", from)))?
                .take_card(card_id)
                .ok_or_else(|| {
                    BoardError::not_found(format!("card {} in column {}", card_id, from))
                })?;
            card.touch(now);
            board
                .column_mut(to)
                .ok_or_else(|| BoardError::not_found(format!("column {}", to)))?
                .cards
                .push(card);
            Ok(((), BoardChange::CardMoved { card_id, from, to }))
        })
    }

    pub fn remove_card(&mut self, column_id: ColumnId, card_id: CardId) -> BoardResult<Card> {
        self.commit(|board, _| {
            let card = board
                .column_mut(column_id)
                .ok_or_else(|| BoardError::not_found(format!("column {}", column_id)))?
                .take_card(card_id)
                .ok_or_else(|| {
                    BoardError::not_found(format!("card {} in column {}", card_id, column_id))
                })?;
            Ok((card, BoardChange::CardRemoved { column_id, card_id }))
        })
    }

    /// Copies a card into the same column with a fresh id, `title_suffix` appended
    /// to the title and every checklist item unchecked.
    pub fn duplicate_card(
        &mut self,
        column_id: ColumnId,
        card_id: CardId,
        title_suffix: &str,
    ) -> BoardResult<CardId> {
        let id = self.next_card_id();
        let new_id = self.commit(|board, now| {
            let column = board
                .column_mut(column_id)
                .ok_or_else(|| BoardError::not_found(format!("column {}", column_id)))?;
            let copy = column
                .card(card_id)
                .ok_or_else(|| {
                    BoardError::not_found(format!("card {} in column {}", card_id, column_id))
                })?
                .duplicate(id, title_suffix, now);
            column.cards.push(copy);
            Ok((id, BoardChange::CardAdded { column_id, card_id: id }))
        })?;
        self.card_high_water = new_id;
        Ok(new_id)
    }

    /// Returns the item's new `done` state.
    pub fn toggle_checklist_item(
        &mut self,
        column_id: ColumnId,
        card_id: CardId,
        item_id: u32,
    ) -> BoardResult<bool> {
        self.commit(|board, now| {
            let card = card_in(board, column_id, card_id)?;
            let done = card.toggle_checklist_item(item_id, now).ok_or_else(|| {
                BoardError::not_found(format!("checklist item {} on card {}", item_id, card_id))
            })?;
            Ok((done, BoardChange::CardEdited { column_id, card_id }))
        })
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::compute(&self.board, self.clock.today())
    }

    /// Pretty-printed JSON array of columns.
    pub fn export_snapshot(&self) -> BoardResult<String> {
        serde_json::to_string_pretty(&self.board)
            .map_err(|e| BoardError::Serialization(e.to_string()))
    }

    /// Replaces the whole board. Anything other than a JSON array of columns with
    /// unique ids is rejected and the current board is left untouched.
    pub fn import_snapshot(&mut self, payload: &str) -> BoardResult<()> {
        let imported = parse_snapshot(payload)?;
        let (max_column, max_card) = (imported.max_column_id(), imported.max_card_id());
        self.commit(move |board, _| {
            *board = imported;
            Ok(((), BoardChange::Imported))
        })?;
        self.column_high_water = self.column_high_water.max(max_column);
        self.card_high_water = self.card_high_water.max(max_card);
        tracing::info!(
            columns = self.board.columns.len(),
            cards = self.board.total_cards(),
            "board imported"
        );
        Ok(())
    }

    /// Re-reads storage after an external write. Returns whether anything changed.
    pub fn reload(&mut self) -> bool {
        let fresh = self.storage.load();
        if fresh == self.board {
            return false;
        }
        self.column_high_water = self.column_high_water.max(fresh.max_column_id());
        self.card_high_water = self.card_high_water.max(fresh.max_card_id());
        self.board = fresh;
        tracing::debug!("board reloaded from storage");
        self.notify(&BoardChange::Reloaded);
        true
    }

    fn next_card_id(&self) -> CardId {
        self.board.max_card_id().max(self.card_high_water) + 1
    }

    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut Board, DateTime<Utc>) -> BoardResult<(T, BoardChange)>,
    ) -> BoardResult<T> {
        let previous = self.board.clone();
        let now = self.clock.now();
        let (value, change) = match mutate(&mut self.board, now) {
            Ok(result) => result,
            Err(e) => {
                self.board = previous;
                return Err(e);
            }
        };
        if let Err(e) = self.storage.save(&self.board) {
            tracing::error!(error = %e, change = ?change, "saving board failed, change rolled back");
            self.board = previous;
            return Err(e);
        }
        tracing::debug!(change = ?change, "board saved");
        self.notify(&change);
        Ok(value)
    }

    fn notify(&mut self, change: &BoardChange) {
        let event = BoardEvent {
            change,
            board: &self.board,
        };
        for (_, observer) in self.observers.iter_mut() {
            observer.on_board_changed(event);
        }
    }
}

fn card_in(board: &mut Board, column_id: ColumnId, card_id: CardId) -> BoardResult<&mut Card> {
    board
        .column_mut(column_id)
        .ok_or_else(|| BoardError::not_found(format!("column {}", column_id)))?
        .card_mut(card_id)
        .ok_or_else(|| BoardError::not_found(format!("card {} in column {}", card_id, column_id)))
}

/// Parses an exported snapshot without touching any board.
pub fn parse_snapshot(payload: &str) -> BoardResult<Board> {
    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| BoardError::InvalidImport(format!("not valid JSON: {}", e)))?;
    if !value.is_array() {
        return Err(BoardError::InvalidImport(
            "expected a JSON array of columns".to_string(),
        ));
    }
    let board: Board = serde_json::from_value(value)
        .map_err(|e| BoardError::InvalidImport(format!("malformed column: {}", e)))?;
    match board.find_duplicate_id() {
        Some(DuplicateId::Column(id)) => Err(BoardError::InvalidImport(format!(
            "column id {} appears more than once",
            id
        ))),
        Some(DuplicateId::Card(id)) => Err(BoardError::InvalidImport(format!(
            "card id {} appears more than once",
            id
        ))),
        None => Ok(board),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airdrop_core::FixedClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct SharedStorage {
        saved: Rc<RefCell<Option<Board>>>,
        fail: Rc<RefCell<bool>>,
    }

    impl BoardStorage for SharedStorage {
        fn load(&self) -> Board {
            self.saved.borrow().clone().unwrap_or_default()
        }

        fn save(&self, board: &Board) -> BoardResult<()> {
            if *self.fail.borrow() {
                return Err(BoardError::QuotaExceeded {
                    key: "airdrop-board".into(),
                    needed: 10,
                    limit: 1,
                });
            }
            *self.saved.borrow_mut() = Some(board.clone());
            Ok(())
        }
    }

    fn model() -> (BoardModel, SharedStorage) {
        let storage = SharedStorage::default();
        let clock = Arc::new(FixedClock::at_date(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        ));
        (BoardModel::new(Box::new(storage.clone()), clock), storage)
    }

    #[test]
    fn test_add_column_assigns_order_and_default_color() {
        let (mut model, storage) = model();
        let a = model.add_column("Todo", "").unwrap();
        let b = model.add_column("Done", "#16a34a").unwrap();
        assert_eq!((a, b), (1, 2));
        assert_eq!(model.column(b).unwrap().order, 2);
        assert_eq!(model.column(a).unwrap().color, "#2563eb");
        assert_eq!(storage.load().columns.len(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let (mut model, _) = model();
        let col = model.add_column("Todo", "").unwrap();
        let first = model.add_card(col, NewCard::titled("a")).unwrap();
        model.remove_card(col, first).unwrap();
        let second = model.add_card(col, NewCard::titled("b")).unwrap();
        assert!(second > first);

        model.remove_column(col).unwrap();
        let col2 = model.add_column("Again", "").unwrap();
        assert!(col2 > col);
    }

    #[test]
    fn test_add_card_to_missing_column() {
        let (mut model, _) = model();
        let err = model.add_card(42, NewCard::titled("x")).unwrap_err();
        assert!(matches!(err, BoardError::NotFound(_)));
    }

    #[test]
    fn test_edit_missing_column_is_not_found() {
        let (mut model, _) = model();
        assert!(matches!(
            model.edit_column(3, "x", ""),
            Err(BoardError::NotFound(_))
        ));
    }

    #[test]
    fn test_save_failure_rolls_back_and_is_silent() {
        let (mut model, storage) = model();
        let col = model.add_column("Todo", "").unwrap();
        let calls = Rc::new(RefCell::new(0));
        let seen = calls.clone();
        model.subscribe(move |_event: BoardEvent<'_>| *seen.borrow_mut() += 1);

        *storage.fail.borrow_mut() = true;
        let err = model.add_card(col, NewCard::titled("x")).unwrap_err();
        assert!(err.is_storage_failure());
        assert_eq!(model.board().total_cards(), 0);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_observers_get_change_after_save() {
        let (mut model, storage) = model();
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        let probe = storage.clone();
        let id = model.subscribe(move |event: BoardEvent<'_>| {
            assert_eq!(probe.load(), *event.board);
            sink.borrow_mut().push(event.change.clone());
        });
        let col = model.add_column("Todo", "").unwrap();
        assert!(model.unsubscribe(id));
        model.add_column("Ignored", "").unwrap();
        assert_eq!(*changes.borrow(), vec![BoardChange::ColumnAdded(col)]);
        assert!(!model.unsubscribe(id));
    }

    #[test]
    fn test_move_card_refreshes_updated_at() {
        let storage = SharedStorage::default();
        let clock = Arc::new(FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        let mut model = BoardModel::new(Box::new(storage), clock.clone());
        let a = model.add_column("A", "").unwrap();
        let b = model.add_column("B", "").unwrap();
        let card = model.add_card(a, NewCard::titled("x")).unwrap();
        clock.advance(chrono::Duration::hours(1));

        model.move_card(card, a, b).unwrap();
        let (column, moved) = model.card(card).unwrap();
        assert_eq!(column, b);
        assert!(moved.updated_at > moved.created_at);
        assert!(model.column(a).unwrap().cards.is_empty());
    }

    #[test]
    fn test_move_card_missing_source_card() {
        let (mut model, _) = model();
        let a = model.add_column("A", "").unwrap();
        let b = model.add_column("B", "").unwrap();
        assert!(matches!(model.move_card(7, a, b), Err(BoardError::NotFound(_))));
        assert!(matches!(model.move_card(7, a, 99), Err(BoardError::NotFound(_))));
    }

    #[test]
    fn test_move_within_same_column_is_noop() {
        let (mut model, _) = model();
        let a = model.add_column("A", "").unwrap();
        let card = model.add_card(a, NewCard::titled("x")).unwrap();
        model.move_card(card, a, a).unwrap();
        assert_eq!(model.column(a).unwrap().cards.len(), 1);
    }

    #[test]
    fn test_reorder_column() {
        let (mut model, _) = model();
        let a = model.add_column("A", "").unwrap();
        let b = model.add_column("B", "").unwrap();
        let c = model.add_column("C", "").unwrap();
        model.reorder_column(c, 1).unwrap();
        let ids: Vec<ColumnId> = model.columns().iter().map(|col| col.id).collect();
        assert_eq!(ids, vec![c, a, b]);
        model.reorder_column(c, 99).unwrap();
        let ids: Vec<ColumnId> = model.columns().iter().map(|col| col.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_duplicate_card() {
        let (mut model, _) = model();
        let col = model.add_column("A", "").unwrap();
        let card = model.add_card(col, NewCard::titled("Task")).unwrap();
        let copy = model.duplicate_card(col, card, " (copy)").unwrap();
        assert_ne!(copy, card);
        assert_eq!(model.card(copy).unwrap().1.title, "Task (copy)");
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let (mut model, _) = model();
        model.add_column("Keep", "").unwrap();
        let before = model.board().clone();
        let payload = r#"[{"id":1,"name":"A","cards":[]},{"id":1,"name":"B","cards":[]}]"#;
        assert!(matches!(
            model.import_snapshot(payload),
            Err(BoardError::InvalidImport(_))
        ));
        assert_eq!(model.board(), &before);
    }

    #[test]
    fn test_reload_picks_up_external_writes() {
        let (mut model, storage) = model();
        assert!(!model.reload());
        let mut external = Board::new();
        external.columns.push(Column::new(5, "External", "", 1));
        storage.save(&external).unwrap();
        assert!(model.reload());
        assert_eq!(model.add_column("Next", "").unwrap(), 6);
    }
}
