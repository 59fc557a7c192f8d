//! Key decoding.
//!
//! Converts crossterm key events into the closed set of keys the selector
//! reacts to. Anything outside that set is dropped here so the selector
//! never sees it.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

// =============================================================================
// TYPES
// =============================================================================

/// A key the selector reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Backspace,
    /// A single printable code point.
    Char(char),
    /// Ctrl+A or Home.
    WordStart,
    /// Ctrl+E or End.
    WordEnd,
    /// Ctrl+K.
    KillToEnd,
}

/// Result of decoding one terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Key(Key),
    /// Ctrl+C. Never handed to the selector.
    Interrupt,
    Ignored,
}

// =============================================================================
// DECODING
// =============================================================================

/// Decode one terminal event.
pub fn decode(event: &Event) -> Decoded {
    match event {
        Event::Key(key) => decode_key(key),
        _ => Decoded::Ignored,
    }
}

/// Decode a crossterm key event.
///
/// Only presses and auto-repeats count; releases are ignored.
pub fn decode_key(event: &KeyEvent) -> Decoded {
    if event.kind == KeyEventKind::Release {
        return Decoded::Ignored;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);

    match (ctrl, alt) {
        (false, false) => plain_key(event.code),
        (true, false) => control_key(event.code),
        // Windows reports AltGr as Ctrl+Alt; only the character it produced
        // is kept.
        (true, true) => match event.code {
            KeyCode::Char(c) if is_printable(c) => Decoded::Key(Key::Char(c)),
            _ => Decoded::Ignored,
        },
        (false, true) => Decoded::Ignored,
    }
}

/// Keys with at most Shift held.
fn plain_key(code: KeyCode) -> Decoded {
    let key = match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Home => Key::WordStart,
        KeyCode::End => Key::WordEnd,
        KeyCode::Char(c) if is_printable(c) => Key::Char(c),
        _ => return Decoded::Ignored,
    };
    Decoded::Key(key)
}

fn control_key(code: KeyCode) -> Decoded {
    match code {
        KeyCode::Char('c' | 'C') => Decoded::Interrupt,
        KeyCode::Char('a' | 'A') => Decoded::Key(Key::WordStart),
        KeyCode::Char('e' | 'E') => Decoded::Key(Key::WordEnd),
        KeyCode::Char('k' | 'K') => Decoded::Key(Key::KillToEnd),
        _ => Decoded::Ignored,
    }
}

/// Single code point at or above space, excluding DEL and C1 controls.
fn is_printable(c: char) -> bool {
    c >= ' ' && !c.is_control()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn key(code: KeyCode) -> Decoded {
        decode(&press(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Decoded {
        decode(&press(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(key(KeyCode::Up), Decoded::Key(Key::Up));
        assert_eq!(key(KeyCode::Down), Decoded::Key(Key::Down));
        assert_eq!(key(KeyCode::Left), Decoded::Key(Key::Left));
        assert_eq!(key(KeyCode::Right), Decoded::Key(Key::Right));
        assert_eq!(key(KeyCode::Enter), Decoded::Key(Key::Enter));
        assert_eq!(key(KeyCode::Esc), Decoded::Key(Key::Escape));
        assert_eq!(key(KeyCode::Backspace), Decoded::Key(Key::Backspace));
    }

    #[test]
    fn test_home_end_alias_word_jumps() {
        assert_eq!(key(KeyCode::Home), Decoded::Key(Key::WordStart));
        assert_eq!(key(KeyCode::End), Decoded::Key(Key::WordEnd));
        assert_eq!(ctrl('a'), Decoded::Key(Key::WordStart));
        assert_eq!(ctrl('e'), Decoded::Key(Key::WordEnd));
        assert_eq!(ctrl('k'), Decoded::Key(Key::KillToEnd));
    }

    #[test]
    fn test_ctrl_c_is_interrupt() {
        assert_eq!(ctrl('c'), Decoded::Interrupt);
    }

    #[test]
    fn test_printable_chars() {
        assert_eq!(key(KeyCode::Char('d')), Decoded::Key(Key::Char('d')));
        assert_eq!(key(KeyCode::Char(' ')), Decoded::Key(Key::Char(' ')));
        assert_eq!(key(KeyCode::Char('é')), Decoded::Key(Key::Char('é')));
        // Shifted letters arrive already uppercased
        assert_eq!(
            decode(&press(KeyCode::Char('D'), KeyModifiers::SHIFT)),
            Decoded::Key(Key::Char('D'))
        );
    }

    #[test]
    fn test_unmapped_combinations_dropped() {
        assert_eq!(ctrl('x'), Decoded::Ignored);
        assert_eq!(
            decode(&press(KeyCode::Char('f'), KeyModifiers::ALT)),
            Decoded::Ignored
        );
        assert_eq!(key(KeyCode::Char('\u{7f}')), Decoded::Ignored);
        assert_eq!(key(KeyCode::Tab), Decoded::Ignored);
        assert_eq!(key(KeyCode::F(1)), Decoded::Ignored);
    }

    #[test]
    fn test_modified_arrows_dropped() {
        let ctrl_alt = KeyModifiers::CONTROL | KeyModifiers::ALT;
        assert_eq!(decode(&press(KeyCode::Up, ctrl_alt)), Decoded::Ignored);
        assert_eq!(decode(&press(KeyCode::Down, ctrl_alt)), Decoded::Ignored);
        assert_eq!(decode(&press(KeyCode::Up, KeyModifiers::ALT)), Decoded::Ignored);
        assert_eq!(decode(&press(KeyCode::Down, KeyModifiers::CONTROL)), Decoded::Ignored);
        assert_eq!(
            decode(&press(KeyCode::Up, KeyModifiers::SHIFT)),
            Decoded::Key(Key::Up)
        );
    }

    #[test]
    fn test_altgr_characters_typed() {
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        assert_eq!(decode(&press(KeyCode::Char('@'), altgr)), Decoded::Key(Key::Char('@')));
        assert_eq!(decode(&press(KeyCode::Char('€'), altgr)), Decoded::Key(Key::Char('€')));
        // Not an interrupt when Alt is also held
        assert_eq!(decode(&press(KeyCode::Char('c'), altgr)), Decoded::Key(Key::Char('c')));
        assert_eq!(decode(&press(KeyCode::Enter, altgr)), Decoded::Ignored);
    }

    #[test]
    fn test_release_ignored() {
        let mut event = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(decode(&Event::Key(event)), Decoded::Ignored);
    }

    #[test]
    fn test_non_key_events_ignored() {
        assert_eq!(decode(&Event::Resize(80, 24)), Decoded::Ignored);
        assert_eq!(decode(&Event::FocusGained), Decoded::Ignored);
    }
}
