/// Single-line text buffer used by form fields and the search box.
///
/// `cursor` counts chars, not bytes, so multi-byte input (e.g. Chinese
/// column names) moves one glyph at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    buffer: String,
    cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let buffer = text.into();
        let cursor = buffer.chars().count();
        Self { buffer, cursor }
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_offset(self.cursor - 1);
            self.buffer.remove(at);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.buffer.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.char_len();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in chars.
    pub fn cursor_pos(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut input = InputState::new();
        for c in "空投板".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.cursor_pos(), 3);
        input.backspace();
        assert_eq!(input.as_str(), "空投");
        assert_eq!(input.cursor_pos(), 2);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = InputState::with_text("ac");
        input.move_left();
        input.insert_char('b');
        assert_eq!(input.as_str(), "abc");
        assert_eq!(input.cursor_pos(), 2);
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut input = InputState::with_text("abc");
        input.delete();
        assert_eq!(input.as_str(), "abc");
        input.move_home();
        input.delete();
        assert_eq!(input.as_str(), "bc");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = InputState::with_text("ab");
        input.move_right();
        assert_eq!(input.cursor_pos(), 2);
        input.move_home();
        input.move_left();
        assert_eq!(input.cursor_pos(), 0);
        input.backspace();
        assert_eq!(input.as_str(), "ab");
    }

    #[test]
    fn test_set_and_clear() {
        let mut input = InputState::new();
        input.set("DeFi, L2");
        assert_eq!(input.cursor_pos(), 8);
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor_pos(), 0);
    }
}
