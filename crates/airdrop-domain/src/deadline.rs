use chrono::NaiveDate;
use serde::Serialize;

use crate::board::Board;
use crate::card::CardId;
use crate::column::ColumnId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeadlineKind {
    DueTomorrow,
    DueInAWeek,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadlineAlert {
    pub kind: DeadlineKind,
    pub card_id: CardId,
    pub column_id: ColumnId,
    pub title: String,
    pub due_date: NaiveDate,
}

/// Alerts for the board as of `today`, in board order. Done cards never alert.
pub fn deadline_alerts(board: &Board, today: NaiveDate) -> Vec<DeadlineAlert> {
    board
        .columns
        .iter()
        .flat_map(|column| {
            column.cards.iter().filter_map(move |card| {
                if card.is_done() {
                    return None;
                }
                let due_date = card.due_date?;
                let kind = match (due_date - today).num_days() {
                    1 => DeadlineKind::DueTomorrow,
                    7 => DeadlineKind::DueInAWeek,
                    d if d < 0 => DeadlineKind::Overdue,
                    _ => return None,
                };
                Some(DeadlineAlert {
                    kind,
                    card_id: card.id,
                    column_id: column.id,
                    title: card.title.clone(),
                    due_date,
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, CardStatus};
    use crate::column::Column;
    use crate::field_update::NewCard;
    use chrono::Utc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn due_card(id: CardId, due: NaiveDate) -> Card {
        let mut card = Card::new(id, NewCard::titled(format!("c{}", id)), Utc::now());
        card.due_date = Some(due);
        card
    }

    #[test]
    fn test_alert_kinds() {
        let mut column = Column::new(1, "Todo", "", 1);
        column.cards.push(due_card(1, day(11)));
        column.cards.push(due_card(2, day(17)));
        column.cards.push(due_card(3, day(5)));
        column.cards.push(due_card(4, day(10)));
        column.cards.push(due_card(5, day(13)));
        let board = Board::from_columns(vec![column]);

        let kinds: Vec<(CardId, DeadlineKind)> = deadline_alerts(&board, day(10))
            .into_iter()
            .map(|a| (a.card_id, a.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (1, DeadlineKind::DueTomorrow),
                (2, DeadlineKind::DueInAWeek),
                (3, DeadlineKind::Overdue),
            ]
        );
    }

    #[test]
    fn test_done_cards_are_silent() {
        let mut column = Column::new(1, "Todo", "", 1);
        let mut card = due_card(1, day(1));
        card.status = CardStatus::Done;
        column.cards.push(card);
        assert!(deadline_alerts(&Board::from_columns(vec![column]), day(10)).is_empty());
    }
}
