//! Text area collaborator.
//!
//! The input bar only needs a handful of facts about the text it hosts:
//! the current text, how many images are attached, and how many rows the
//! text wants at a given width. [`TextBuffer`] is the default
//! implementation: a soft-wrapping single-cursor editor.

use std::cell::Cell;
use unicode_width::UnicodeWidthChar;

/// What the input bar asks of its text area.
pub trait TextArea {
    /// Rows the current content needs at `width` columns. At least 1.
    fn natural_height(&self, width: u16) -> u16;

    /// Current text.
    fn text(&self) -> &str;

    /// Number of attached images.
    fn image_attachment_count(&self) -> usize;

    /// Switch between growing and scrolling internally.
    fn set_scroll_enabled(&mut self, enabled: bool);

    /// Drop any cached natural height.
    fn invalidate_natural_size(&mut self);
}

/// Result of wrapping text into rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedText {
    /// Visual rows.
    pub lines: Vec<String>,
    /// Cursor as `(row, column)`.
    pub cursor: (usize, usize),
}

/// Hard-wrap `text` at `width` columns, tracking the byte offset `cursor`.
///
/// Newlines start a new row. Wide characters never straddle a row
/// boundary.
pub fn wrap_text(text: &str, width: u16, cursor: usize) -> WrappedText {
    let width = usize::from(width.max(1));
    let mut lines = vec![String::new()];
    let mut col = 0;
    let mut cursor_at = None;

    for (idx, ch) in text.char_indices() {
        if ch == '\n' {
            if idx == cursor {
                cursor_at = Some((lines.len() - 1, col));
            }
            lines.push(String::new());
            col = 0;
            continue;
        }
        let ch_width = ch.width().unwrap_or(0);
        if col > 0 && col + ch_width > width {
            lines.push(String::new());
            col = 0;
        }
        if idx == cursor {
            cursor_at = Some((lines.len() - 1, col));
        }
        if let Some(line) = lines.last_mut() {
            line.push(ch);
        }
        col += ch_width;
    }

    let cursor = cursor_at.unwrap_or((lines.len() - 1, col));
    WrappedText { lines, cursor }
}

/// Default text area: an editable string with a byte-offset cursor.
#[derive(Debug, Default)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
    images: usize,
    scroll_enabled: bool,
    cached_height: Cell<Option<(u16, u16)>>,
}

impl TextBuffer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `text` with the cursor at its end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self {
            text,
            cursor,
            ..Self::default()
        }
    }

    /// Byte offset of the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the text scrolls inside its area.
    pub fn is_scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    /// Replace the whole text and move the cursor to its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
        self.invalidate_natural_size();
    }

    /// Remove all text and attachments.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.images = 0;
        self.invalidate_natural_size();
    }

    /// Insert `ch` at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.invalidate_natural_size();
    }

    /// Insert `s` at the cursor.
    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
        self.invalidate_natural_size();
    }

    /// Delete the character before the cursor. Returns whether anything
    /// was removed.
    pub fn backspace(&mut self) -> bool {
        let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() else {
            return false;
        };
        self.text.remove(idx);
        self.cursor = idx;
        self.invalidate_natural_size();
        true
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor);
        self.invalidate_natural_size();
        true
    }

    /// Move the cursor one character left.
    pub fn move_left(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    /// Move the cursor one character right.
    pub fn move_right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    /// Move the cursor to the start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Record one more attached image.
    pub fn attach_image(&mut self) {
        self.images += 1;
    }

    /// Wrapped rows and cursor position at `width`.
    pub fn wrapped(&self, width: u16) -> WrappedText {
        wrap_text(&self.text, width, self.cursor)
    }

    /// First row to draw so the cursor stays inside `height` rows.
    ///
    /// Always 0 unless scrolling is enabled.
    pub fn scroll_offset(&self, width: u16, height: u16) -> usize {
        if !self.scroll_enabled || height == 0 {
            return 0;
        }
        let (row, _) = self.wrapped(width).cursor;
        (row + 1).saturating_sub(usize::from(height))
    }
}

impl TextArea for TextBuffer {
    fn natural_height(&self, width: u16) -> u16 {
        if let Some((cached_width, height)) = self.cached_height.get() {
            if cached_width == width {
                return height;
            }
        }
        let rows = wrap_text(&self.text, width, self.cursor).lines.len();
        let height = u16::try_from(rows).unwrap_or(u16::MAX);
        self.cached_height.set(Some((width, height)));
        height
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn image_attachment_count(&self) -> usize {
        self.images
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }

    fn invalidate_natural_size(&mut self) {
        self.cached_height.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_one_row() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.natural_height(10), 1);
        assert_eq!(buffer.wrapped(10).cursor, (0, 0));
    }

    #[test]
    fn long_line_wraps_at_width() {
        let wrapped = wrap_text("abcdefghij", 4, 10);
        assert_eq!(wrapped.lines, vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrapped.cursor, (2, 2));
    }

    #[test]
    fn newlines_start_rows() {
        let wrapped = wrap_text("a\n\nb", 10, 0);
        assert_eq!(wrapped.lines, vec!["a", "", "b"]);
    }

    #[test]
    fn cursor_on_wrapped_char_moves_to_next_row() {
        let wrapped = wrap_text("abcdef", 3, 3);
        assert_eq!(wrapped.cursor, (1, 0));
    }

    #[test]
    fn wide_chars_do_not_straddle_rows() {
        let wrapped = wrap_text("a日本", 4, 0);
        assert_eq!(wrapped.lines, vec!["a日", "本"]);
    }

    #[test]
    fn editing_tracks_cursor_and_height() {
        let mut buffer = TextBuffer::new();
        for ch in "hello".chars() {
            buffer.insert_char(ch);
        }
        assert_eq!(buffer.natural_height(3), 2);
        buffer.insert_char('\n');
        assert_eq!(buffer.natural_height(3), 3);
        assert!(buffer.backspace());
        assert_eq!(buffer.text(), "hello");
        assert_eq!(buffer.natural_height(3), 2);
    }

    #[test]
    fn backspace_at_start_is_a_noop() {
        let mut buffer = TextBuffer::with_text("ab");
        buffer.move_home();
        assert!(!buffer.backspace());
        assert_eq!(buffer.text(), "ab");
    }

    #[test]
    fn cursor_moves_over_multibyte_chars() {
        let mut buffer = TextBuffer::with_text("é!");
        buffer.move_left();
        buffer.move_left();
        assert_eq!(buffer.cursor(), 0);
        buffer.move_right();
        assert_eq!(buffer.cursor(), 'é'.len_utf8());
        assert!(buffer.delete());
        assert_eq!(buffer.text(), "é");
    }

    #[test]
    fn scroll_offset_follows_cursor_only_when_enabled() {
        let mut buffer = TextBuffer::with_text("a\nb\nc\nd");
        assert_eq!(buffer.scroll_offset(10, 2), 0);
        buffer.set_scroll_enabled(true);
        assert_eq!(buffer.scroll_offset(10, 2), 2);
        buffer.move_home();
        assert_eq!(buffer.scroll_offset(10, 2), 0);
    }

    #[test]
    fn clear_drops_images() {
        let mut buffer = TextBuffer::with_text("x");
        buffer.attach_image();
        assert_eq!(buffer.image_attachment_count(), 1);
        buffer.clear();
        assert_eq!(buffer.image_attachment_count(), 0);
        assert_eq!(buffer.text(), "");
    }
}
