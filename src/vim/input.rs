use crate::wizard::validation::digits_only;
use zeroize::Zeroize;

/// What an [`InputBuffer`] accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFilter {
    #[default]
    Any,
    /// Digits only, at most `max` of them. Other characters are dropped on
    /// input and anything beyond `max` is discarded silently.
    Digits { max: usize },
}

/// Single-line editable text with a character cursor
#[derive(Default, Clone)]
pub struct InputBuffer {
    content: String,
    cursor: usize,
    filter: InputFilter,
    sensitive: bool,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Digit-only buffer capped at `max` characters
    pub fn digits(max: usize) -> Self {
        let mut buf = Self::default();
        buf.filter = InputFilter::Digits { max };
        buf
    }

    /// Wipe the content from memory when cleared or dropped
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn filter(&self) -> InputFilter {
        self.filter
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// Insert at the cursor. Returns false when the filter rejected `c`.
    pub fn insert(&mut self, c: char) -> bool {
        if let InputFilter::Digits { max } = self.filter {
            if !c.is_ascii_digit() || self.len() >= max {
                return false;
            }
        }
        let byte_pos = self.cursor_byte_position();
        self.content.insert(byte_pos, c);
        self.cursor += 1;
        true
    }

    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.remove_at_cursor();
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        self.remove_at_cursor();
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        if self.sensitive {
            self.content.zeroize();
        }
        self.content.clear();
        self.cursor = 0;
    }

    /// Replace the content (filtered) and move the cursor to the end
    pub fn set(&mut self, value: &str) {
        let value = match self.filter {
            InputFilter::Any => value.to_string(),
            InputFilter::Digits { max } => digits_only(value, max),
        };
        self.clear();
        self.content = value;
        self.cursor = self.len();
    }

    fn remove_at_cursor(&mut self) {
        let byte_pos = self.cursor_byte_position();
        let next_byte_pos = self.content[byte_pos..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| byte_pos + i)
            .unwrap_or(self.content.len());
        self.content.drain(byte_pos..next_byte_pos);
    }

    fn cursor_byte_position(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}

impl Drop for InputBuffer {
    fn drop(&mut self) {
        if self.sensitive {
            self.content.zeroize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_around_multibyte_characters() {
        let mut buf = InputBuffer::new();
        for c in "पता".chars() {
            buf.insert(c);
        }
        buf.move_left();
        assert!(buf.delete_back());
        assert_eq!(buf.len(), 2);
        buf.move_start();
        assert!(buf.delete_forward());
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn digit_buffer_starts_empty_with_its_filter() {
        let buf = InputBuffer::digits(16).sensitive();
        assert_eq!(buf.filter(), InputFilter::Digits { max: 16 });
        assert!(buf.is_empty());
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn digit_buffer_rejects_letters_and_overflow() {
        let mut buf = InputBuffer::digits(6);
        assert!(!buf.insert('a'));
        for c in "5600019".chars() {
            buf.insert(c);
        }
        assert_eq!(buf.content(), "560001");
    }

    #[test]
    fn set_applies_the_digit_mask() {
        let mut buf = InputBuffer::digits(12).sensitive();
        buf.set("1234-5678-9012-3456");
        assert_eq!(buf.content(), "123456789012");
        assert_eq!(buf.cursor(), 12);
    }

    #[test]
    fn clear_resets_cursor() {
        let mut buf = InputBuffer::new();
        buf.set("Priya");
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.cursor(), 0);
    }
}
