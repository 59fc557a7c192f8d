//! Selector UI state and its transitions.
//!
//! Pure state machine: no I/O happens here, so every key sequence can be
//! replayed in tests. The controller in the parent module feeds keys in and
//! renders whatever state results.

use crate::input::{FilterInput, Key};
use crate::layout::HEADER_ROWS;
use crate::profiles::Profile;
use crate::search::FuzzySearcher;

/// Number of data rows visible for a given page size.
///
/// The page budgets the header block plus the data window; at least one
/// data row is always shown.
pub fn data_page_size(page_size: usize) -> usize {
    page_size.saturating_sub(HEADER_ROWS).max(1)
}

/// What a key did to the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<'a> {
    Running,
    Resolved(&'a Profile),
    Cancelled,
}

/// Filter text, cursor, selection and scroll window.
///
/// Invariants after every call to [`handle`](Self::handle):
/// - `cursor_position() <= filter_text().chars().count()`
/// - when the list is non-empty,
///   `scroll_offset() <= selected_index() < scroll_offset() + data_page_size()`
#[derive(Debug, Clone)]
pub struct SelectorState<'a> {
    searcher: &'a FuzzySearcher,
    input: FilterInput,
    selected: usize,
    scroll_offset: usize,
    filtered: Vec<&'a Profile>,
    data_page_size: usize,
}

impl<'a> SelectorState<'a> {
    pub fn new(searcher: &'a FuzzySearcher, page_size: usize) -> Self {
        Self {
            searcher,
            input: FilterInput::new(),
            selected: 0,
            scroll_offset: 0,
            filtered: searcher.all(),
            data_page_size: data_page_size(page_size),
        }
    }

    /// Apply one key.
    pub fn handle(&mut self, key: Key) -> Transition<'a> {
        match key {
            Key::Up => self.move_selection(-1),
            Key::Down => self.move_selection(1),
            Key::Left => self.input.move_left(),
            Key::Right => self.input.move_right(),
            Key::WordStart => self.input.home(),
            Key::WordEnd => self.input.end(),
            Key::Backspace => {
                if self.input.backspace() {
                    self.refilter();
                }
            }
            Key::KillToEnd => {
                if self.input.kill_to_end() {
                    self.refilter();
                }
            }
            Key::Char(ch) => {
                self.input.insert(ch);
                self.refilter();
            }
            Key::Enter => {
                if let Some(profile) = self.selected_profile() {
                    tracing::debug!("resolved {:?}", profile.name);
                    return Transition::Resolved(profile);
                }
            }
            Key::Escape => {
                tracing::debug!("cancelled");
                return Transition::Cancelled;
            }
        }
        Transition::Running
    }

    pub fn filter_text(&self) -> String {
        self.input.text()
    }

    pub fn cursor_position(&self) -> usize {
        self.input.cursor()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn data_page_size(&self) -> usize {
        self.data_page_size
    }

    /// Resize the data window, keeping the selection inside it.
    pub fn set_page_size(&mut self, page_size: usize) {
        let size = data_page_size(page_size);
        if size != self.data_page_size {
            tracing::debug!("data window {} -> {size}", self.data_page_size);
            self.data_page_size = size;
            self.adjust_scroll();
        }
    }

    /// Profiles matching the current filter, in display order.
    pub fn filtered(&self) -> &[&'a Profile] {
        &self.filtered
    }

    pub fn selected_profile(&self) -> Option<&'a Profile> {
        self.filtered.get(self.selected).copied()
    }

    /// Wrap-around move; no-op on an empty list.
    fn move_selection(&mut self, delta: isize) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        self.selected = if delta < 0 {
            (self.selected + len - 1) % len
        } else {
            (self.selected + 1) % len
        };
        self.adjust_scroll();
    }

    /// Smallest scroll change that brings the selection into the window.
    fn adjust_scroll(&mut self) {
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.data_page_size {
            self.scroll_offset = self.selected + 1 - self.data_page_size;
        }
    }

    fn refilter(&mut self) {
        let text = self.input.text();
        self.filtered = self.searcher.search(&text);
        self.selected = 0;
        self.scroll_offset = 0;
        tracing::debug!("filter {:?}: {} rows", text, self.filtered.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envs() -> FuzzySearcher {
        FuzzySearcher::new(vec![
            Profile::new("dev", "111111111111"),
            Profile::new("prod", "222222222222"),
            Profile::new("staging", "333333333333"),
        ])
    }

    fn many(n: usize) -> FuzzySearcher {
        FuzzySearcher::new(
            (0..n)
                .map(|i| Profile::new(format!("profile-{i:02}"), format!("{i:012}")))
                .collect(),
        )
    }

    fn type_text(state: &mut SelectorState<'_>, text: &str) {
        for ch in text.chars() {
            assert_eq!(state.handle(Key::Char(ch)), Transition::Running);
        }
    }

    fn assert_window(state: &SelectorState<'_>) {
        if !state.filtered().is_empty() {
            assert!(state.scroll_offset() <= state.selected_index());
            assert!(state.selected_index() < state.scroll_offset() + state.data_page_size());
        }
        assert!(state.cursor_position() <= state.filter_text().chars().count());
    }

    #[test]
    fn test_initial_state() {
        let searcher = envs();
        let state = SelectorState::new(&searcher, 10);
        assert_eq!(state.filter_text(), "");
        assert_eq!(state.cursor_position(), 0);
        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.scroll_offset(), 0);
        assert_eq!(state.filtered().len(), 3);
        assert_eq!(state.data_page_size(), 7);
    }

    #[test]
    fn test_data_page_size_floor() {
        assert_eq!(data_page_size(20), 17);
        assert_eq!(data_page_size(3), 1);
        assert_eq!(data_page_size(0), 1);
    }

    #[test]
    fn test_wrap_around() {
        let searcher = envs();
        let mut state = SelectorState::new(&searcher, 10);
        state.handle(Key::Up);
        assert_eq!(state.selected_index(), 2);
        state.handle(Key::Down);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn test_type_and_resolve() {
        let searcher = envs();
        let mut state = SelectorState::new(&searcher, 10);
        type_text(&mut state, "d");
        // The "d" at the end of "prod" is a close enough match as well
        let names: Vec<&str> = state.filtered().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["dev", "prod"]);
        assert_eq!(state.cursor_position(), 1);
        match state.handle(Key::Enter) {
            Transition::Resolved(profile) => assert_eq!(profile.name, "dev"),
            other => panic!("expected resolution, got {other:?}"),
        }
    }

    #[test]
    fn test_escape_cancels() {
        let searcher = envs();
        let mut state = SelectorState::new(&searcher, 10);
        assert_eq!(state.handle(Key::Escape), Transition::Cancelled);
    }

    #[test]
    fn test_enter_on_empty_list_is_noop() {
        let searcher = envs();
        let mut state = SelectorState::new(&searcher, 10);
        type_text(&mut state, "zzz");
        assert!(state.filtered().is_empty());
        assert_eq!(state.handle(Key::Enter), Transition::Running);
        state.handle(Key::Down);
        state.handle(Key::Up);
        assert_eq!(state.selected_index(), 0);

        for _ in 0..3 {
            state.handle(Key::Backspace);
        }
        assert_eq!(state.filter_text(), "");
        assert_eq!(state.filtered().len(), 3);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn test_refilter_resets_selection() {
        let searcher = many(30);
        let mut state = SelectorState::new(&searcher, 10);
        for _ in 0..9 {
            state.handle(Key::Down);
        }
        assert_eq!(state.selected_index(), 9);
        assert_eq!(state.scroll_offset(), 3);

        type_text(&mut state, "p");
        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.scroll_offset(), 0);
    }

    #[test]
    fn test_scroll_follows_selection_minimally() {
        let searcher = many(30);
        let mut state = SelectorState::new(&searcher, 10);
        for _ in 0..8 {
            state.handle(Key::Down);
        }
        assert_eq!(state.selected_index(), 8);
        assert_eq!(state.scroll_offset(), 2);

        // Moving back up inside the window leaves it alone
        state.handle(Key::Up);
        state.handle(Key::Up);
        assert_eq!(state.scroll_offset(), 2);

        // Wrapping from the top jumps the window to the end
        let mut state = SelectorState::new(&searcher, 10);
        state.handle(Key::Up);
        assert_eq!(state.selected_index(), 29);
        assert_eq!(state.scroll_offset(), 23);

        state.handle(Key::Down);
        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.scroll_offset(), 0);
    }

    #[test]
    fn test_shrinking_window_keeps_selection_visible() {
        let searcher = many(30);
        let mut state = SelectorState::new(&searcher, 20);
        for _ in 0..12 {
            state.handle(Key::Down);
        }
        assert_eq!(state.scroll_offset(), 0);

        state.set_page_size(10);
        assert_eq!(state.data_page_size(), 7);
        assert_eq!(state.scroll_offset(), 6);
        assert_window(&state);

        // Growing again leaves the offset alone
        state.set_page_size(20);
        assert_eq!(state.scroll_offset(), 6);
        assert_window(&state);
    }

    #[test]
    fn test_cursor_editing_does_not_refilter() {
        let searcher = envs();
        let mut state = SelectorState::new(&searcher, 10);
        type_text(&mut state, "prd");
        state.handle(Key::Down);
        let selected = state.selected_index();

        state.handle(Key::Left);
        state.handle(Key::WordStart);
        state.handle(Key::Right);
        state.handle(Key::WordEnd);
        assert_eq!(state.cursor_position(), 3);
        assert_eq!(state.selected_index(), selected);
    }

    #[test]
    fn test_kill_to_end_refilters() {
        let searcher = envs();
        let mut state = SelectorState::new(&searcher, 10);
        type_text(&mut state, "dzzz");
        assert!(state.filtered().is_empty());

        state.handle(Key::WordStart);
        state.handle(Key::Right);
        state.handle(Key::KillToEnd);
        assert_eq!(state.filter_text(), "d");
        assert_eq!(state.filtered()[0].name, "dev");

        // Nothing after the cursor: no change
        state.handle(Key::KillToEnd);
        assert_eq!(state.filter_text(), "d");
    }

    #[test]
    fn test_insert_in_middle() {
        let searcher = envs();
        let mut state = SelectorState::new(&searcher, 10);
        type_text(&mut state, "stgng");
        state.handle(Key::WordStart);
        state.handle(Key::Right);
        state.handle(Key::Right);
        state.handle(Key::Char('a'));
        assert_eq!(state.filter_text(), "stagng");
        assert_eq!(state.cursor_position(), 3);
    }

    #[test]
    fn test_invariants_hold_for_mixed_sequence() {
        let searcher = many(30);
        let mut state = SelectorState::new(&searcher, 10);
        let keys = [
            Key::Down,
            Key::Char('1'),
            Key::Up,
            Key::Up,
            Key::Left,
            Key::Left,
            Key::Backspace,
            Key::Right,
            Key::Right,
            Key::Down,
            Key::Char('x'),
            Key::Backspace,
            Key::Backspace,
            Key::KillToEnd,
            Key::WordEnd,
            Key::Up,
            Key::Up,
            Key::Up,
        ];
        for key in keys {
            state.handle(key);
            assert_window(&state);
        }
    }
}
