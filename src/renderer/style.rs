//! Styled text fragments.
//!
//! A [`Style`] turns a plain string into a self-contained SGR run: the
//! opening codes, the text, and a trailing reset. Fragments can therefore
//! be concatenated freely without one leaking colors into the next.

use super::ansi;
use super::output::OutputBuffer;
use crate::types::{Attr, Color};

/// Foreground, background and attributes for one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attrs: Attr,
}

impl Style {
    /// A style that emits no escape codes at all.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: Attr::NONE,
        }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub const fn attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }

    /// Same style with `bg` filled in, unless one is already set.
    pub const fn or_bg(self, color: Option<Color>) -> Self {
        match (self.bg, color) {
            (None, Some(color)) => self.bg(color),
            _ => self,
        }
    }

    /// Check whether painting with this style would emit anything.
    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_empty()
    }

    /// Wrap `text` in this style's escape codes.
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }

        // Writes into an in-memory buffer cannot fail.
        let mut out = OutputBuffer::with_capacity(text.len() + 32);
        ansi::attrs(&mut out, self.attrs).ok();
        if let Some(fg) = self.fg {
            ansi::fg(&mut out, fg).ok();
        }
        if let Some(bg) = self.bg {
            ansi::bg(&mut out, bg).ok();
        }
        out.write_str(text);
        ansi::reset(&mut out).ok();
        out.into_string()
    }
}

// =============================================================================
// Palette
// =============================================================================

/// Colors used by the selector.
pub mod palette {
    use crate::types::Color;

    /// Filter prompt label (indigo).
    pub const PROMPT: Color = Color::Rgb(0x63, 0x66, 0xF1);
    /// Table borders and the idle cursor glyph.
    pub const BORDER: Color = Color::Indexed(8);
    /// Column titles.
    pub const HEADER: Color = Color::Indexed(15);
    /// Background of the selected row.
    pub const SELECTED_BG: Color = Color::Rgb(0x31, 0x32, 0x44);
    /// Left edge of the selected row.
    pub const SELECTED_EDGE: Color = Color::Indexed(14);
    /// Marker and name of the current profile.
    pub const CURRENT: Color = Color::Indexed(2);
    pub const SESSION_ACTIVE: Color = Color::Indexed(2);
    pub const SESSION_EXPIRED: Color = Color::Indexed(3);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_style_is_passthrough() {
        assert_eq!(Style::new().paint("dev"), "dev");
    }

    #[test]
    fn test_paint_wraps_and_resets() {
        let style = Style::new().fg(Color::Indexed(8));
        assert_eq!(style.paint("│"), "\x1b[90m│\x1b[0m");

        let bold = Style::new().attrs(Attr::BOLD).fg(Color::Indexed(15));
        assert_eq!(bold.paint("Profile"), "\x1b[1m\x1b[97mProfile\x1b[0m");
    }

    #[test]
    fn test_paint_with_background() {
        let style = Style::new().bg(Color::Rgb(1, 2, 3));
        assert_eq!(style.paint("x"), "\x1b[48;2;1;2;3mx\x1b[0m");
    }

    #[test]
    fn test_or_bg_keeps_existing() {
        let red = Color::Indexed(1);
        let blue = Color::Indexed(4);
        assert_eq!(Style::new().or_bg(Some(red)).bg, Some(red));
        assert_eq!(Style::new().bg(blue).or_bg(Some(red)).bg, Some(blue));
        assert_eq!(Style::new().or_bg(None).bg, None);
    }
}
