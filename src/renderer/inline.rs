//! Inline renderer for normal terminal mode.
//!
//! The selector draws below the shell prompt instead of taking over the
//! alternate screen. Each repaint:
//!
//! - Moves back to the first line of the previous paint
//! - Clears and rewrites every line (no leftovers from longer lines)
//! - Clears trailing lines when the new frame is shorter, then returns
//!   to the last line of the new frame
//!
//! Between frames the renderer only remembers how many lines it painted,
//! the terminal size and whether it hid the cursor.

use std::borrow::Cow;
use std::io::{self, Write};

use super::ansi;
use super::output::OutputBuffer;
use super::style::{Style, palette};
use crate::layout::clip_to_width;
use crate::types::Attr;

/// Label at the start of the prompt line.
pub const PROMPT_LABEL: &str = "Filter:";

/// Glyph drawn when the cursor sits past the last character.
pub const CURSOR_GLYPH: &str = "█";

/// Everything that should be on screen after a repaint.
///
/// `header` and `footer` frame the table and never scroll; only
/// `rows[window_offset..window_offset + window_size]` is shown of the body.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub filter_text: &'a str,
    /// Cursor position in characters.
    pub cursor_position: usize,
    pub header: &'a [String],
    pub rows: &'a [String],
    pub footer: &'a [String],
    pub window_offset: usize,
    pub window_size: usize,
}

impl<'a> Frame<'a> {
    /// The slice of `rows` that falls inside the window.
    pub fn visible_rows(&self) -> &'a [String] {
        let end = self
            .window_offset
            .saturating_add(self.window_size)
            .min(self.rows.len());
        let start = self.window_offset.min(end);
        &self.rows[start..end]
    }
}

/// Inline renderer for normal terminal mode.
///
/// Once the terminal size is known (see [`set_size`](Self::set_size)),
/// every line is clipped to the width and the frame to the height, so one
/// logical line is always one screen row and a repaint never scrolls.
pub struct InlineRenderer<W: Write> {
    writer: W,
    output: OutputBuffer,
    previous_height: usize,
    size: Option<(u16, u16)>,
    cursor_hidden: bool,
}

impl<W: Write> InlineRenderer<W> {
    /// Create a renderer over any writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            output: OutputBuffer::new(),
            previous_height: 0,
            size: None,
            cursor_hidden: false,
        }
    }

    /// Terminal size in columns and rows. Zero in either dimension means
    /// the size is unknown and nothing is clipped.
    pub fn set_size(&mut self, columns: u16, rows: u16) {
        self.size = (columns > 0 && rows > 0).then_some((columns, rows));
    }

    /// Render a frame inline, replacing the previous paint.
    pub fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let prompt = prompt_line(frame.filter_text, frame.cursor_position);

        let mut lines: Vec<&str> = Vec::with_capacity(
            1 + frame.header.len() + frame.window_size + frame.footer.len(),
        );
        lines.push(&prompt);
        lines.extend(frame.header.iter().map(String::as_str));
        lines.extend(frame.visible_rows().iter().map(String::as_str));
        lines.extend(frame.footer.iter().map(String::as_str));

        let Some((columns, rows)) = self.size else {
            return self.paint(&lines);
        };
        lines.truncate(usize::from(rows));
        let clipped: Vec<Cow<'_, str>> = lines
            .iter()
            .map(|line| clip_to_width(line, usize::from(columns)))
            .collect();
        let clipped: Vec<&str> = clipped.iter().map(|line| &**line).collect();
        self.paint(&clipped)
    }

    /// Write `lines` over the previous paint.
    fn paint(&mut self, lines: &[&str]) -> io::Result<()> {
        ansi::begin_sync(&mut self.output)?;

        // Back to the first line of the previous paint
        if self.previous_height > 0 {
            ansi::cursor_up(&mut self.output, rows(self.previous_height - 1))?;
            ansi::cursor_column_zero(&mut self.output)?;
        }

        for (i, line) in lines.iter().enumerate() {
            ansi::erase_line(&mut self.output)?;
            self.output.write_str(line);
            if i + 1 < lines.len() {
                ansi::newline(&mut self.output)?;
            }
        }

        // Shorter frame: wipe what is left below, then come back up
        if self.previous_height > lines.len() {
            let stale = self.previous_height - lines.len();
            for _ in 0..stale {
                ansi::newline(&mut self.output)?;
                ansi::erase_line(&mut self.output)?;
            }
            ansi::cursor_up(&mut self.output, rows(stale))?;
        }

        ansi::end_sync(&mut self.output)?;
        self.output.flush_to(&mut self.writer)?;

        tracing::trace!(
            "painted {} lines (previous {})",
            lines.len(),
            self.previous_height
        );
        self.previous_height = lines.len();
        Ok(())
    }

    /// Erase every painted line and make the cursor visible again.
    pub fn clear(&mut self) -> io::Result<()> {
        if self.previous_height > 0 {
            ansi::cursor_up(&mut self.output, rows(self.previous_height - 1))?;
            ansi::cursor_column_zero(&mut self.output)?;
            ansi::erase_down(&mut self.output)?;
            self.previous_height = 0;
        }
        self.show_cursor()
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        ansi::cursor_hide(&mut self.output)?;
        self.cursor_hidden = true;
        self.output.flush_to(&mut self.writer)
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        ansi::cursor_show(&mut self.output)?;
        self.cursor_hidden = false;
        self.output.flush_to(&mut self.writer)
    }

    /// Get the number of lines painted by the last render.
    pub fn previous_height(&self) -> usize {
        self.previous_height
    }
}

impl<W: Write> Drop for InlineRenderer<W> {
    // Dropped mid-run, by a panic for instance: give the cursor back.
    fn drop(&mut self) {
        if !self.cursor_hidden {
            return;
        }
        if let Err(err) = self.show_cursor() {
            tracing::warn!("failed to restore the cursor: {err}");
        }
    }
}

/// Compose the prompt line with the cursor drawn at `cursor` (in chars).
///
/// The character under the cursor is shown in inverse video; past the end
/// a block glyph is drawn instead.
pub fn prompt_line(text: &str, cursor: usize) -> String {
    let label = Style::new().fg(palette::PROMPT).paint(PROMPT_LABEL);

    let split = text
        .char_indices()
        .nth(cursor)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let (before, rest) = text.split_at(split);

    let mut line = format!("{label} {before}");
    let mut chars = rest.chars();
    match chars.next() {
        Some(under) => {
            let mut buf = [0u8; 4];
            let under = Style::new()
                .attrs(Attr::INVERSE)
                .paint(under.encode_utf8(&mut buf));
            line.push_str(&under);
            line.push_str(chars.as_str());
        }
        None => {
            line.push_str(&Style::new().fg(palette::BORDER).paint(CURSOR_GLYPH));
        }
    }
    line
}

/// Clamp a line count to what a cursor movement accepts.
fn rows(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
