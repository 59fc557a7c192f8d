//! ANSI escape sequences for terminal control.
//!
//! Only what an inline renderer needs: relative cursor movement, cursor
//! visibility, line and screen erase, synchronized output and SGR styling.
//! No terminfo lookup happens anywhere; every sequence is plain VT/xterm.
//!
//! Every writer is generic over [`Write`] so the same calls target stdout,
//! an [`OutputBuffer`](super::OutputBuffer) or a test `Vec<u8>`.

use std::io::{self, Write};

use crate::types::{Attr, Color};

const CSI: &str = "\x1b[";

pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";
pub const ERASE_LINE: &str = "\x1b[2K";
pub const ERASE_DOWN: &str = "\x1b[J";
pub const COLUMN_ZERO: &str = "\x1b[1G";
/// Mode 2026: the terminal holds output until the matching end marker.
pub const SYNC_BEGIN: &str = "\x1b[?2026h";
pub const SYNC_END: &str = "\x1b[?2026l";
pub const RESET: &str = "\x1b[0m";

/// Raw mode turns off output post-processing, so a bare `\n` would only
/// move down a row.
pub const NEWLINE: &str = "\r\n";

fn emit<W: Write>(w: &mut W, seq: &str) -> io::Result<()> {
    w.write_all(seq.as_bytes())
}

// =============================================================================
// Cursor
// =============================================================================

/// Move the cursor up `n` rows. Zero writes nothing.
pub fn cursor_up<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    match n {
        0 => Ok(()),
        n => write!(w, "{CSI}{n}A"),
    }
}

pub fn cursor_column_zero<W: Write>(w: &mut W) -> io::Result<()> {
    emit(w, COLUMN_ZERO)
}

pub fn cursor_hide<W: Write>(w: &mut W) -> io::Result<()> {
    emit(w, HIDE_CURSOR)
}

pub fn cursor_show<W: Write>(w: &mut W) -> io::Result<()> {
    emit(w, SHOW_CURSOR)
}

// =============================================================================
// Lines
// =============================================================================

/// Erase the whole current line, leaving the cursor where it is.
pub fn erase_line<W: Write>(w: &mut W) -> io::Result<()> {
    emit(w, ERASE_LINE)
}

/// Erase from the cursor to the end of the screen.
pub fn erase_down<W: Write>(w: &mut W) -> io::Result<()> {
    emit(w, ERASE_DOWN)
}

pub fn newline<W: Write>(w: &mut W) -> io::Result<()> {
    emit(w, NEWLINE)
}

pub fn begin_sync<W: Write>(w: &mut W) -> io::Result<()> {
    emit(w, SYNC_BEGIN)
}

pub fn end_sync<W: Write>(w: &mut W) -> io::Result<()> {
    emit(w, SYNC_END)
}

// =============================================================================
// SGR
// =============================================================================

pub fn reset<W: Write>(w: &mut W) -> io::Result<()> {
    emit(w, RESET)
}

pub fn fg<W: Write>(w: &mut W, color: Color) -> io::Result<()> {
    write!(w, "{CSI}{}m", color.sgr_params(30))
}

pub fn bg<W: Write>(w: &mut W, color: Color) -> io::Result<()> {
    write!(w, "{CSI}{}m", color.sgr_params(40))
}

/// All set attributes in one sequence. An empty set writes nothing.
pub fn attrs<W: Write>(w: &mut W, attr: Attr) -> io::Result<()> {
    let codes: Vec<String> = attr.sgr_codes().map(|code| code.to_string()).collect();
    if codes.is_empty() {
        return Ok(());
    }
    write!(w, "{CSI}{}m", codes.join(";"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_cursor_up() {
        assert_eq!(written(|w| cursor_up(w, 5)), "\x1b[5A");
        assert_eq!(written(|w| cursor_up(w, 0)), "");
    }

    #[test]
    fn test_fixed_sequences() {
        assert_eq!(written(cursor_column_zero), "\x1b[1G");
        assert_eq!(written(cursor_hide), "\x1b[?25l");
        assert_eq!(written(cursor_show), "\x1b[?25h");
        assert_eq!(written(erase_line), "\x1b[2K");
        assert_eq!(written(erase_down), "\x1b[J");
        assert_eq!(written(newline), "\r\n");
        assert_eq!(written(begin_sync), "\x1b[?2026h");
        assert_eq!(written(end_sync), "\x1b[?2026l");
    }

    #[test]
    fn test_colors() {
        assert_eq!(written(|w| fg(w, Color::Default)), "\x1b[39m");
        assert_eq!(written(|w| fg(w, Color::Indexed(8))), "\x1b[90m");
        assert_eq!(
            written(|w| fg(w, Color::Rgb(0x63, 0x66, 0xF1))),
            "\x1b[38;2;99;102;241m"
        );
        assert_eq!(written(|w| bg(w, Color::Indexed(1))), "\x1b[41m");
        assert_eq!(written(|w| bg(w, Color::Indexed(9))), "\x1b[101m");
    }

    #[test]
    fn test_attrs() {
        assert_eq!(written(|w| attrs(w, Attr::BOLD)), "\x1b[1m");
        assert_eq!(written(|w| attrs(w, Attr::BOLD | Attr::INVERSE)), "\x1b[1;7m");
        assert_eq!(written(|w| attrs(w, Attr::NONE)), "");
    }
}
