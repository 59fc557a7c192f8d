//! Core types for awsp.
//!
//! Colors and text attributes shared by the style layer and the ANSI
//! writers. Everything the renderer emits is described in these terms.

// =============================================================================
// Color
// =============================================================================

/// A terminal color.
///
/// Palette colors follow the xterm numbering: 0-7 standard, 8-15 bright,
/// 16-255 extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Whatever the terminal's own foreground or background is.
    #[default]
    Default,
    Indexed(u8),
    Rgb(u8, u8, u8),
}

impl Color {
    /// SGR parameters selecting this color.
    ///
    /// `base` is 30 for foreground and 40 for background; bright palette
    /// entries use the aixterm range (`base + 60`).
    pub fn sgr_params(self, base: u8) -> String {
        match self {
            Color::Default => format!("{}", base + 9),
            Color::Indexed(i @ 0..=7) => format!("{}", base + i),
            Color::Indexed(i @ 8..=15) => format!("{}", base + 60 + (i - 8)),
            Color::Indexed(i) => format!("{};5;{i}", base + 8),
            Color::Rgb(r, g, b) => format!("{};2;{r};{g};{b}", base + 8),
        }
    }
}

// =============================================================================
// Text Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::INVERSE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 4;
    }
}

impl Attr {
    /// SGR codes for each set flag, in ascending order.
    pub fn sgr_codes(self) -> impl Iterator<Item = u8> {
        [
            (Attr::BOLD, 1),
            (Attr::DIM, 2),
            (Attr::ITALIC, 3),
            (Attr::UNDERLINE, 4),
            (Attr::INVERSE, 7),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, code)| code)
    }
}
