//! Filter text editing.
//!
//! Handles character insertion, deletion and cursor movement for the
//! one-line filter prompt. Text is kept as a `Vec<char>` so the cursor is
//! always a character index, never a byte offset.

// =============================================================================
// FILTER INPUT
// =============================================================================

/// Editable single-line buffer with a cursor.
///
/// The cursor always stays within `0..=len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInput {
    chars: Vec<char>,
    cursor: usize,
}

impl FilterInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Cursor position in characters.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length in characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Insert a character at the cursor and advance past it.
    pub fn insert(&mut self, ch: char) {
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor (Backspace).
    /// Returns true if the text changed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    /// Jump to the start of the text.
    pub fn home(&mut self) {
        self.cursor = 0;
    }

    /// Jump past the last character.
    pub fn end(&mut self) {
        self.cursor = self.chars.len();
    }

    /// Drop everything from the cursor on.
    /// Returns true if the text changed.
    pub fn kill_to_end(&mut self) -> bool {
        if self.cursor >= self.chars.len() {
            return false;
        }
        self.chars.truncate(self.cursor);
        true
    }
}
