//! Single-line editable text fields.
//!
//! Every field receives every keystroke; a field that is not focused
//! ignores it. The reducer relies on this, so [`TextInput::apply`] must be
//! a no-op while unfocused.

/// An editing keystroke, already decoupled from the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    /// Insert a character at the cursor.
    Char(char),
    /// Delete the character before the cursor.
    Backspace,
    /// Delete the character under the cursor.
    Delete,
    /// Move the cursor one character left.
    Left,
    /// Move the cursor one character right.
    Right,
    /// Move the cursor to the start of the line.
    Home,
    /// Move the cursor to the end of the line.
    End,
    /// Move the cursor to the start of the previous word.
    WordLeft,
    /// Move the cursor past the end of the next word.
    WordRight,
    /// Delete from the start of the previous word up to the cursor.
    DeleteWordBackward,
    /// Delete everything before the cursor.
    DeleteToStart,
    /// Delete everything from the cursor to the end of the line.
    DeleteToEnd,
    /// A key with no editing meaning. Every field ignores it.
    Other,
}

/// Capability contract for a focusable text field.
pub trait TextInput {
    /// Apply a keystroke. No-op while unfocused.
    fn apply(&mut self, key: Keystroke);

    /// Current buffer contents.
    fn value(&self) -> &str;

    /// Give this field focus.
    fn focus(&mut self);

    /// Take focus away from this field.
    fn blur(&mut self);

    /// Whether this field currently accepts keystrokes.
    fn is_focused(&self) -> bool;

    /// Clear the buffer and move the cursor home.
    fn reset(&mut self);
}

/// Hand-rolled single-line text buffer.
///
/// The cursor is a character index into `buffer`, so multi-byte input
/// never splits a code point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    buffer: String,
    cursor: usize,
    focused: bool,
    prompt: String,
    placeholder: String,
}

impl LineInput {
    /// Create an empty, unfocused field with the default `"> "` prompt.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prompt: "> ".to_string(),
            ..Self::default()
        }
    }

    /// Builder: set initial contents. The cursor is placed at the end.
    #[must_use]
    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    /// Builder: set the placeholder shown while the field is empty.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        placeholder.clone_into(&mut self.placeholder);
        self
    }

    /// Builder: set the prompt rendered before the text.
    #[must_use]
    pub fn with_prompt(mut self, prompt: &str) -> Self {
        prompt.clone_into(&mut self.prompt);
        self
    }

    /// Replace the contents and move the cursor to the end.
    pub fn set_value(&mut self, value: &str) {
        value.clone_into(&mut self.buffer);
        self.cursor = self.len();
    }

    /// Cursor position as a character index.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Prompt text.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Placeholder text.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Number of characters in the buffer.
    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Byte offset of a character index.
    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    fn enter_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    fn delete_char_before(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.buffer.remove(at);
            self.cursor -= 1;
        }
    }

    fn delete_char_at(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.buffer.remove(at);
        }
    }

    /// Remove the characters in `start..end` (character indices).
    fn delete_range(&mut self, start: usize, end: usize) {
        let from = self.byte_index(start);
        let to = self.byte_index(end);
        self.buffer.replace_range(from..to, "");
        self.cursor = start;
    }

    /// Character index of the start of the word before the cursor.
    fn word_start_before(&self) -> usize {
        let chars: Vec<char> = self.buffer.chars().collect();
        let mut i = self.cursor;
        while i > 0 && chars[i - 1].is_whitespace() {
            i -= 1;
        }
        while i > 0 && !chars[i - 1].is_whitespace() {
            i -= 1;
        }
        i
    }

    /// Character index just past the word after the cursor.
    fn word_end_after(&self) -> usize {
        let chars: Vec<char> = self.buffer.chars().collect();
        let mut i = self.cursor;
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
        i
    }
}

impl TextInput for LineInput {
    fn apply(&mut self, key: Keystroke) {
        if !self.focused {
            return;
        }
        match key {
            Keystroke::Char(c) => self.enter_char(c),
            Keystroke::Backspace => self.delete_char_before(),
            Keystroke::Delete => self.delete_char_at(),
            Keystroke::Left => self.cursor = self.cursor.saturating_sub(1),
            Keystroke::Right => self.cursor = (self.cursor + 1).min(self.len()),
            Keystroke::Home => self.cursor = 0,
            Keystroke::End => self.cursor = self.len(),
            Keystroke::WordLeft => self.cursor = self.word_start_before(),
            Keystroke::WordRight => self.cursor = self.word_end_after(),
            Keystroke::DeleteWordBackward => {
                let start = self.word_start_before();
                self.delete_range(start, self.cursor);
            }
            Keystroke::DeleteToStart => self.delete_range(0, self.cursor),
            Keystroke::DeleteToEnd => self.delete_range(self.cursor, self.len()),
            Keystroke::Other => {}
        }
    }

    fn value(&self) -> &str {
        &self.buffer
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }
}
