//! Text Measurement
//!
//! Utilities for measuring text in terminal cells.
//!
//! Terminal text width depends on Unicode character widths:
//! - ASCII characters: 1 cell
//! - CJK characters: 2 cells (fullwidth)
//! - Emoji: 2 cells (most)
//! - Zero-width characters: 0 cells
//!
//! Byte length and char count are both wrong for column alignment, so
//! every width in the table goes through here.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Measure the display width of a string in terminal cells.
#[inline]
pub fn string_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Left-align `s` in a field `width` cells wide.
///
/// Text already at or past `width` is returned unchanged.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(string_width(s));
    let mut out = String::with_capacity(s.len() + fill);
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', fill));
    out
}

/// Cut a styled line down to `width` visible cells.
///
/// CSI sequences are copied through without counting, including those
/// after the cut, so every SGR run still ends in its reset. A wide
/// character that would straddle the edge is dropped whole.
pub fn clip_to_width(s: &str, width: usize) -> Cow<'_, str> {
    let mut out = String::with_capacity(s.len());
    let mut used = 0;
    let mut full = false;
    let mut clipped = false;

    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            out.push(c);
            if let Some(open) = chars.next_if_eq(&'[') {
                out.push(open);
                // Parameters and intermediates up to the final byte
                for c in chars.by_ref() {
                    out.push(c);
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }

        let cells = UnicodeWidthChar::width(c).unwrap_or(0);
        if full || used + cells > width {
            full = true;
            clipped = true;
            continue;
        }
        used += cells;
        out.push(c);
    }

    if clipped {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(s)
    }
}
