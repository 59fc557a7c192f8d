//! Profile table layout.
//!
//! Column widths are computed once from the full record set, so filtering
//! never makes columns jump. Every line starts with a two-cell gutter that
//! carries the current-profile marker, followed by the boxed table:
//!
//! ```text
//!   ┌─────────┬──────────────┬────────────────┬─────────┐
//!   │ Profile │ Account ID   │ Region         │ Session │
//!   ├─────────┼──────────────┼────────────────┼─────────┤
//! ● ┃ dev     │ 111111111111 │ ap-northeast-1 │ active  │   ← selected + current
//!   │ prod    │ 222222222222 │ us-east-1      │ expired │
//!   └─────────┴──────────────┴────────────────┴─────────┘
//! ```

use super::text_measure::{pad_to_width, string_width};
use crate::profiles::{Profile, SessionStatus};
use crate::renderer::{Style, palette};
use crate::types::{Attr, Color};

/// Lines above the data rows: top border, titles, separator.
pub const HEADER_ROWS: usize = 3;

const TITLES: [&str; COLUMNS] = ["Profile", "Account ID", "Region", "Session"];
const COLUMNS: usize = 4;

const GUTTER_EMPTY: &str = "  ";
const GUTTER_CURRENT: &str = "● ";
const EDGE: &str = "│";
const EDGE_SELECTED: &str = "┃";

/// Precomputed borders, titles and column widths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    widths: [usize; COLUMNS],
    border_top: String,
    header: String,
    border_mid: String,
    border_bottom: String,
}

impl TableLayout {
    /// Compute the layout for `profiles`.
    ///
    /// Each column is as wide as its title or its widest value, measured in
    /// terminal cells.
    pub fn new(profiles: &[Profile]) -> Self {
        let mut widths = TITLES.map(string_width);
        for profile in profiles {
            for (width, cell) in widths.iter_mut().zip(cells(profile)) {
                *width = (*width).max(string_width(cell));
            }
        }

        let title_style = Style::new().attrs(Attr::BOLD).fg(palette::HEADER);
        let mut header = GUTTER_EMPTY.to_string();
        header.push_str(&Style::new().fg(palette::BORDER).paint(&format!("{EDGE} ")));
        header.push_str(&join_cells(
            TITLES
                .iter()
                .zip(widths)
                .map(|(title, width)| title_style.paint(&pad_to_width(title, width))),
            None,
        ));

        Self {
            border_top: border(&widths, '┌', '┬', '┐'),
            header,
            border_mid: border(&widths, '├', '┼', '┤'),
            border_bottom: border(&widths, '└', '┴', '┘'),
            widths,
        }
    }

    /// Column widths in cells, without padding.
    pub fn column_widths(&self) -> [usize; COLUMNS] {
        self.widths
    }

    pub fn border_top(&self) -> &str {
        &self.border_top
    }

    /// The column titles line.
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn border_mid(&self) -> &str {
        &self.border_mid
    }

    pub fn border_bottom(&self) -> &str {
        &self.border_bottom
    }

    /// The fixed lines drawn above the data rows.
    pub fn header_rows(&self) -> Vec<String> {
        vec![
            self.border_top.clone(),
            self.header.clone(),
            self.border_mid.clone(),
        ]
    }

    /// Row under the selection bar.
    ///
    /// Gets the highlight background and a heavy left edge; the current
    /// marker stays visible on top of it.
    pub fn format_selected_row(&self, profile: &Profile, is_current: bool) -> String {
        self.format_row(profile, is_current, Some(palette::SELECTED_BG))
    }

    pub fn format_unselected_row(&self, profile: &Profile, is_current: bool) -> String {
        self.format_row(profile, is_current, None)
    }

    fn format_row(&self, profile: &Profile, is_current: bool, bg: Option<Color>) -> String {
        let gutter = if is_current {
            Style::new().fg(palette::CURRENT).paint(GUTTER_CURRENT)
        } else {
            GUTTER_EMPTY.to_string()
        };

        let edge = match bg {
            Some(_) => Style::new()
                .attrs(Attr::BOLD)
                .fg(palette::SELECTED_EDGE)
                .or_bg(bg)
                .paint(&format!("{EDGE_SELECTED} ")),
            None => Style::new().fg(palette::BORDER).paint(&format!("{EDGE} ")),
        };

        let name_style = if is_current {
            Style::new().attrs(Attr::BOLD).fg(palette::CURRENT)
        } else {
            Style::new()
        };
        let session_style = match profile.session {
            SessionStatus::Active => Style::new().fg(palette::SESSION_ACTIVE),
            SessionStatus::Expired => Style::new().fg(palette::SESSION_EXPIRED),
            SessionStatus::None => Style::new().fg(palette::BORDER),
        };
        let styles = [name_style, Style::new(), Style::new(), session_style];

        let painted = cells(profile)
            .into_iter()
            .zip(self.widths)
            .zip(styles)
            .map(|((cell, width), style)| style.or_bg(bg).paint(&pad_to_width(cell, width)));

        let mut line = gutter;
        line.push_str(&edge);
        line.push_str(&join_cells(painted, bg));
        line
    }
}

/// Values of the four columns, in order.
fn cells(profile: &Profile) -> [&str; COLUMNS] {
    [
        profile.name.as_str(),
        profile.account_id.as_str(),
        profile.region.as_str(),
        profile.session.label(),
    ]
}

fn border(widths: &[usize; COLUMNS], left: char, cross: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            line.push(cross);
        }
        line.extend(std::iter::repeat_n('─', width + 2));
    }
    line.push(right);

    let mut out = GUTTER_EMPTY.to_string();
    out.push_str(&Style::new().fg(palette::BORDER).paint(&line));
    out
}

/// Painted cells separated by ` │ ` and closed with ` │`.
fn join_cells(cells: impl Iterator<Item = String>, bg: Option<Color>) -> String {
    let border = Style::new().fg(palette::BORDER).or_bg(bg);
    let separator = border.paint(&format!(" {EDGE} "));
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push_str(&separator);
        }
        line.push_str(&cell);
    }
    line.push_str(&border.paint(&format!(" {EDGE}")));
    line
}
