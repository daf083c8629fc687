//! Text editor for composer fields
//!
//! One buffer type serves both single-line fields (URL, header key/value) and
//! the multi-line request body. It tracks a byte cursor that is always kept on
//! a UTF-8 character boundary.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct TextEditor {
    content: String,

    /// Cursor position (byte offset in content)
    cursor: usize,

    /// Whether Enter inserts a newline
    multiline: bool,
}

impl TextEditor {
    pub fn single_line(content: &str) -> Self {
        Self {
            content: content.replace('\n', " "),
            cursor: content.len(),
            multiline: false,
        }
    }

    pub fn multi_line(content: &str) -> Self {
        Self {
            content: content.to_string(),
            cursor: content.len(),
            multiline: true,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Replace all content, cursor goes to the end
    pub fn set_content(&mut self, content: &str) {
        self.content = if self.multiline {
            content.to_string()
        } else {
            content.replace('\n', " ")
        };
        self.cursor = self.content.len();
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert(cursor, c);
        self.cursor = cursor + c.len_utf8();
    }

    /// Insert pasted text, converting curly quotes to straight ones so pasted
    /// JSON stays valid
    pub fn insert_str_normalized(&mut self, s: &str) {
        let mut normalized = s
            .replace(['\u{201C}', '\u{201D}'], "\"")
            .replace(['\u{2018}', '\u{2019}'], "'");
        if !self.multiline {
            normalized = normalized.replace(['\r', '\n'], "");
        }

        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert_str(cursor, &normalized);
        self.cursor = cursor + normalized.len();
    }

    /// Backspace
    pub fn delete_char_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let Some((idx, _)) = self.content[..self.cursor].char_indices().next_back() else {
            return false;
        };
        self.content.remove(idx);
        self.cursor = idx;
        true
    }

    /// Delete key
    pub fn delete_char_after_cursor(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.remove(cursor);
        true
    }

    /// Ctrl+W: delete back to the previous word boundary
    pub fn delete_word_before_cursor(&mut self) {
        let is_boundary = |c: char| c.is_whitespace() || matches!(c, '/' | ':' | '.' | ',');
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        let head = self.content[..cursor].trim_end_matches(is_boundary);
        let start = head
            .char_indices()
            .rev()
            .find(|&(_, c)| is_boundary(c))
            .map_or(0, |(pos, c)| pos + c.len_utf8());
        self.content.replace_range(start..cursor, "");
        self.cursor = start;
    }

    pub fn move_cursor_left(&mut self) -> bool {
        match self.content[..self.cursor].char_indices().next_back() {
            Some((idx, _)) => {
                self.cursor = idx;
                true
            }
            None => false,
        }
    }

    pub fn move_cursor_right(&mut self) -> bool {
        match self.content[self.cursor..].chars().next() {
            Some(c) => {
                self.cursor += c.len_utf8();
                true
            }
            None => false,
        }
    }

    /// Home: start of the current line
    pub fn move_cursor_to_line_start(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    /// End: end of the current line
    pub fn move_cursor_to_line_end(&mut self) {
        self.cursor = self.content[self.cursor..]
            .find('\n')
            .map(|pos| self.cursor + pos)
            .unwrap_or(self.content.len());
    }

    pub fn move_cursor_up(&mut self) -> bool {
        let (line, col) = self.cursor_line_col();
        if line == 0 {
            return false;
        }
        self.cursor = self.offset_for(line - 1, col);
        true
    }

    pub fn move_cursor_down(&mut self) -> bool {
        let (line, col) = self.cursor_line_col();
        if line + 1 >= self.line_count() {
            return false;
        }
        self.cursor = self.offset_for(line + 1, col);
        true
    }

    /// Zero-based (line, column in characters) of the cursor
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.content[..self.cursor];
        let line = before.matches('\n').count();
        let col = before[self.line_start(self.cursor)..].chars().count();
        (line, col)
    }

    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    /// Pretty-print the content if it is valid JSON, returning the parsed value.
    /// Invalid JSON leaves the content untouched.
    pub fn format_json(&mut self) -> Result<Value, String> {
        let json = serde_json::from_str::<Value>(&self.content)
            .map_err(|e| format!("Invalid JSON: {e}"))?;
        self.content = serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string());
        self.cursor = self.content.len();
        Ok(json)
    }

    /// Apply an editing key, returning true if the content or cursor changed
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace => self.delete_char_before_cursor(),
            KeyCode::Delete => self.delete_char_after_cursor(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Up if self.multiline => self.move_cursor_up(),
            KeyCode::Down if self.multiline => self.move_cursor_down(),
            KeyCode::Enter if self.multiline => {
                self.insert_char('\n');
                true
            }
            KeyCode::Home => {
                self.move_cursor_to_line_start();
                true
            }
            KeyCode::End => {
                self.move_cursor_to_line_end();
                true
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_to_line_start();
                true
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_to_line_end();
                true
            }
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.delete_word_before_cursor();
                true
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                true
            }
            _ => false,
        }
    }

    fn line_start(&self, offset: usize) -> usize {
        self.content[..offset].rfind('\n').map(|pos| pos + 1).unwrap_or(0)
    }

    /// Byte offset of (line, col), clamping col to the line length
    fn offset_for(&self, line: usize, col: usize) -> usize {
        let mut start = 0;
        for (idx, text) in self.content.split('\n').enumerate() {
            if idx == line {
                let within = text
                    .char_indices()
                    .nth(col)
                    .map(|(pos, _)| pos)
                    .unwrap_or(text.len());
                return start + within;
            }
            start += text.len() + 1;
        }
        self.content.len()
    }

    fn clamp_cursor_to_boundary(&self, cursor: usize) -> usize {
        let mut pos = cursor.min(self.content.len());
        while pos > 0 && !self.content.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}
