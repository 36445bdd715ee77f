use serde::{Deserialize, Serialize};

use crate::card::{Card, CardId};

pub type ColumnId = u64;

pub const DEFAULT_COLUMN_COLOR: &str = "#2563eb";

/// Colours offered by the column form, in cycle order.
pub const COLUMN_PALETTE: [&str; 7] = [
    "#2563eb", "#16a34a", "#ea580c", "#dc2626", "#9333ea", "#0891b2", "#4b5563",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub cards: Vec<Card>,
}

fn default_color() -> String {
    DEFAULT_COLUMN_COLOR.to_string()
}

impl Column {
    pub fn new(id: ColumnId, name: impl Into<String>, color: impl Into<String>, order: i32) -> Self {
        let color = color.into();
        Self {
            id,
            name: name.into().trim().to_string(),
            color: if color.trim().is_empty() {
                default_color()
            } else {
                color.trim().to_string()
            },
            order,
            cards: Vec::new(),
        }
    }

    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == card_id)
    }

    pub fn take_card(&mut self, card_id: CardId) -> Option<Card> {
        let index = self.cards.iter().position(|c| c.id == card_id)?;
        Some(self.cards.remove(index))
    }
}

/// Next colour in `COLUMN_PALETTE` after `current`, wrapping around.
pub fn next_palette_color(current: &str) -> &'static str {
    let index = COLUMN_PALETTE
        .iter()
        .position(|c| c.eq_ignore_ascii_case(current))
        .map(|i| (i + 1) % COLUMN_PALETTE.len())
        .unwrap_or(0);
    COLUMN_PALETTE[index]
}

/// Accepts `#rgb` or `#rrggbb`.
pub fn is_hex_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Parses `#rgb` / `#rrggbb` into channels.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    if !is_hex_color(value) {
        return None;
    }
    let hex = &value[1..];
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    if hex.len() == 3 {
        let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
        Some((expand(0)?, expand(1)?, expand(2)?))
    } else {
        Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_color_falls_back_to_default() {
        let column = Column::new(1, " To Do ", "", 1);
        assert_eq!(column.name, "To Do");
        assert_eq!(column.color, DEFAULT_COLUMN_COLOR);
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(next_palette_color("#2563eb"), "#16a34a");
        assert_eq!(next_palette_color("#4B5563"), "#2563eb");
        assert_eq!(next_palette_color("#abcdef"), "#2563eb");
    }

    #[test]
    fn test_hex_color_parsing() {
        assert_eq!(parse_hex_color("#2563eb"), Some((0x25, 0x63, 0xeb)));
        assert_eq!(parse_hex_color("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("blue"), None);
        assert!(!is_hex_color("#12345"));
    }
}
