//! Interactive profile selector.
//!
//! [`Selector`] wires the pieces together: keys come in through the
//! [`KeyboardDecoder`], mutate the [`SelectorState`], and every resulting
//! state is turned into table rows by the [`TableLayout`] and painted by the
//! [`InlineRenderer`].
//!
//! # Example
//!
//! ```no_run
//! use awsp::layout::TableLayout;
//! use awsp::profiles::Profile;
//! use awsp::search::FuzzySearcher;
//! use awsp::selector::{Outcome, Selector, SelectorOptions};
//!
//! let profiles = vec![Profile::new("dev", "111111111111")];
//! let layout = TableLayout::new(&profiles);
//! let searcher = FuzzySearcher::new(profiles);
//!
//! match Selector::terminal(&searcher, &layout, SelectorOptions::default()).run()? {
//!     Outcome::Selected(name) => println!("{name}"),
//!     Outcome::Cancelled => eprintln!("Cancelled."),
//! }
//! # Ok::<(), awsp::SelectorError>(())
//! ```

mod state;

pub use state::{SelectorState, Transition, data_page_size};

use std::io::{self, Write};

use crate::error::{Result, SelectorError};
use crate::input::{InputSource, KeyboardDecoder, TerminalInput};
use crate::layout::TableLayout;
use crate::renderer::{Frame, InlineRenderer};
use crate::search::FuzzySearcher;

/// Default number of lines for the header block plus data rows.
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Smallest page that still shows a data row under the header.
pub const MIN_PAGE_SIZE: usize = 4;
/// Lines painted outside the page: the prompt and the bottom border.
pub const CHROME_ROWS: usize = 2;

/// Runtime settings for one selector run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOptions {
    pub page_size: usize,
    /// Name of the already active profile, highlighted in the list.
    pub current: Option<String>,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            current: None,
        }
    }
}

impl SelectorOptions {
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(MIN_PAGE_SIZE);
        self
    }

    pub fn with_current(mut self, current: Option<String>) -> Self {
        self.current = current.filter(|name| !name.is_empty());
        self
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Name of the chosen profile.
    Selected(String),
    Cancelled,
}

/// The interactive single-select controller.
pub struct Selector<'a, S: InputSource, W: Write> {
    searcher: &'a FuzzySearcher,
    layout: &'a TableLayout,
    options: SelectorOptions,
    decoder: KeyboardDecoder<S>,
    renderer: InlineRenderer<W>,
    drawn: bool,
}

impl<'a> Selector<'a, TerminalInput, io::Stdout> {
    /// Selector on the process's own terminal.
    pub fn terminal(
        searcher: &'a FuzzySearcher,
        layout: &'a TableLayout,
        options: SelectorOptions,
    ) -> Self {
        Self::new(searcher, layout, options, TerminalInput::new(), io::stdout())
    }
}

impl<'a, S: InputSource, W: Write> Selector<'a, S, W> {
    pub fn new(
        searcher: &'a FuzzySearcher,
        layout: &'a TableLayout,
        options: SelectorOptions,
        input: S,
        output: W,
    ) -> Self {
        Self {
            searcher,
            layout,
            options,
            decoder: KeyboardDecoder::new(input),
            renderer: InlineRenderer::new(output),
            drawn: false,
        }
    }

    /// Run until the user confirms or cancels.
    ///
    /// Raw mode is released and the painted lines are erased on every exit
    /// path. The first error encountered wins.
    pub fn run(mut self) -> Result<Outcome> {
        let outcome = self.event_loop();

        let stopped = self.decoder.stop();
        let cleared = if self.drawn {
            self.renderer.clear().map_err(SelectorError::from)
        } else {
            Ok(())
        };

        let outcome = outcome?;
        stopped?;
        cleared?;
        Ok(outcome)
    }

    fn event_loop(&mut self) -> Result<Outcome> {
        self.decoder.start()?;
        self.drawn = true;
        self.renderer.hide_cursor()?;

        let mut state = SelectorState::new(self.searcher, self.options.page_size);
        self.fit_to_terminal(&mut state);
        self.render(&state)?;

        loop {
            let key = self.decoder.next_key()?;
            match state.handle(key) {
                Transition::Running => {
                    self.fit_to_terminal(&mut state);
                    self.render(&state)?;
                }
                Transition::Resolved(profile) => return Ok(Outcome::Selected(profile.name.clone())),
                Transition::Cancelled => return Ok(Outcome::Cancelled),
            }
        }
    }

    /// Shrink the page to the terminal's height and pass its size on to the
    /// renderer. Queried before every paint so a resize takes effect on the
    /// next key.
    fn fit_to_terminal(&mut self, state: &mut SelectorState<'_>) {
        let Some((columns, rows)) = self.decoder.terminal_size() else {
            return;
        };
        self.renderer.set_size(columns, rows);
        state.set_page_size(fit_page_size(self.options.page_size, rows));
    }

    fn render(&mut self, state: &SelectorState<'_>) -> Result<()> {
        let header = self.layout.header_rows();
        let rows = build_rows(state, self.layout, self.options.current.as_deref());
        let footer = [self.layout.border_bottom().to_string()];
        let filter_text = state.filter_text();

        let frame = Frame {
            filter_text: &filter_text,
            cursor_position: state.cursor_position(),
            header: &header,
            rows: &rows,
            footer: &footer,
            window_offset: state.scroll_offset(),
            window_size: state.data_page_size(),
        };
        self.renderer.render(&frame)?;
        Ok(())
    }
}

/// Largest page no taller than a terminal with `rows` lines.
///
/// Never below [`MIN_PAGE_SIZE`]; a terminal that small gets its frame cut
/// by the renderer instead.
pub fn fit_page_size(page_size: usize, rows: u16) -> usize {
    let available = usize::from(rows).saturating_sub(CHROME_ROWS);
    page_size.min(available).max(MIN_PAGE_SIZE)
}

/// One formatted line per filtered profile, selection applied.
pub fn build_rows(
    state: &SelectorState<'_>,
    layout: &TableLayout,
    current: Option<&str>,
) -> Vec<String> {
    state
        .filtered()
        .iter()
        .enumerate()
        .map(|(i, profile)| {
            let is_current = current == Some(profile.name.as_str());
            if i == state.selected_index() {
                layout.format_selected_row(profile, is_current)
            } else {
                layout.format_unselected_row(profile, is_current)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::profiles::Profile;

    fn fixtures() -> (FuzzySearcher, TableLayout) {
        let profiles = vec![
            Profile::new("dev", "111111111111"),
            Profile::new("prod", "222222222222"),
            Profile::new("staging", "333333333333"),
        ];
        let layout = TableLayout::new(&profiles);
        (FuzzySearcher::new(profiles), layout)
    }

    #[test]
    fn test_options_defaults() {
        let options = SelectorOptions::default();
        assert_eq!(options.page_size, 20);
        assert_eq!(options.current, None);
    }

    #[test]
    fn test_options_page_size_floor() {
        assert_eq!(SelectorOptions::default().with_page_size(1).page_size, 4);
        assert_eq!(SelectorOptions::default().with_page_size(12).page_size, 12);
    }

    #[test]
    fn test_options_empty_current_ignored() {
        let options = SelectorOptions::default().with_current(Some(String::new()));
        assert_eq!(options.current, None);
    }

    #[test]
    fn test_build_rows_marks_selection_and_current() {
        let (searcher, layout) = fixtures();
        let mut state = SelectorState::new(&searcher, 10);
        state.handle(Key::Down);

        let rows = build_rows(&state, &layout, Some("dev"));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], layout.format_unselected_row(&searcher.profiles()[0], true));
        assert_eq!(rows[1], layout.format_selected_row(&searcher.profiles()[1], false));
        assert_eq!(rows[2], layout.format_unselected_row(&searcher.profiles()[2], false));
    }

    #[test]
    fn test_fit_page_size() {
        assert_eq!(fit_page_size(20, 50), 20);
        // 24 rows: prompt and bottom border leave 22 for header and data
        assert_eq!(fit_page_size(30, 24), 22);
        assert_eq!(fit_page_size(20, 3), MIN_PAGE_SIZE);
    }

    #[test]
    fn test_build_rows_follow_search_order() {
        let profiles = vec![
            Profile::new("dev", "111111111111"),
            Profile::new("prod", "222222222222"),
            Profile::new("staging", "333333333333"),
            Profile::new("eu-dev", "444444444444"),
            Profile::new("eu-prod", "555555555555"),
            Profile::new("us-staging", "666666666666"),
        ];
        let layout = TableLayout::new(&profiles);
        let searcher = FuzzySearcher::new(profiles);

        for term in ["d", "st", "eu", "zz", "4444"] {
            for moves in [0, 1] {
                let mut state = SelectorState::new(&searcher, 20);
                for ch in term.chars() {
                    state.handle(Key::Char(ch));
                }
                for _ in 0..moves {
                    state.handle(Key::Down);
                }

                let expected: Vec<String> = searcher
                    .search(term)
                    .into_iter()
                    .enumerate()
                    .map(|(i, profile)| {
                        if i == state.selected_index() {
                            layout.format_selected_row(profile, false)
                        } else {
                            layout.format_unselected_row(profile, false)
                        }
                    })
                    .collect();
                assert_eq!(build_rows(&state, &layout, None), expected, "term {term:?}");
            }
        }
    }

    #[test]
    fn test_build_rows_empty_filter_result() {
        let (searcher, layout) = fixtures();
        let mut state = SelectorState::new(&searcher, 10);
        for ch in "zzz".chars() {
            state.handle(Key::Char(ch));
        }
        assert!(build_rows(&state, &layout, None).is_empty());
    }
}
