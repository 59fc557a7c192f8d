//! Raw terminal input.
//!
//! [`InputSource`] is the seam between the selector and the terminal:
//! [`TerminalInput`] puts the real TTY in raw mode and reads crossterm
//! events from it, while tests feed a scripted sequence instead.
//! [`KeyboardDecoder`] owns a source for the lifetime of one selector run
//! and guarantees raw mode is released again.

use std::io::{self, IsTerminal, Write};
use std::process;

use crossterm::event::{self, Event};
use crossterm::terminal;

use super::keyboard::{Decoded, Key, decode};
use crate::error::{Result, SelectorError};
use crate::renderer::ansi;

/// Exit status used when the user presses Ctrl+C.
pub const INTERRUPT_EXIT_CODE: i32 = 130;

// =============================================================================
// INPUT SOURCE
// =============================================================================

/// Where terminal events come from.
pub trait InputSource {
    /// Whether the source is an interactive terminal.
    fn is_terminal(&self) -> bool;

    fn enable_raw_mode(&mut self) -> io::Result<()>;

    fn disable_raw_mode(&mut self) -> io::Result<()>;

    /// Block until the next event. `Ok(None)` means input is exhausted.
    fn read_event(&mut self) -> io::Result<Option<Event>>;

    /// Size of the terminal as `(columns, rows)`, if it can be queried.
    fn terminal_size(&self) -> Option<(u16, u16)> {
        None
    }
}

/// The process's own terminal.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for TerminalInput {
    fn is_terminal(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn enable_raw_mode(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    fn disable_raw_mode(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }

    fn read_event(&mut self) -> io::Result<Option<Event>> {
        event::read().map(Some)
    }

    fn terminal_size(&self) -> Option<(u16, u16)> {
        terminal::size().ok()
    }
}

// =============================================================================
// KEYBOARD DECODER
// =============================================================================

/// Turns an [`InputSource`] into a stream of [`Key`]s.
///
/// Raw mode is entered by [`start`](Self::start) and left by
/// [`stop`](Self::stop), which is idempotent and also runs on drop.
pub struct KeyboardDecoder<S: InputSource> {
    source: S,
    raw: bool,
}

impl<S: InputSource> KeyboardDecoder<S> {
    pub fn new(source: S) -> Self {
        Self { source, raw: false }
    }

    /// Enter raw, unechoed input mode.
    ///
    /// Fails with [`SelectorError::NotATerminal`] when the source is not a
    /// TTY, since no keystrokes would ever arrive.
    pub fn start(&mut self) -> Result<()> {
        if self.raw {
            return Ok(());
        }
        if !self.source.is_terminal() {
            return Err(SelectorError::NotATerminal);
        }
        self.source.enable_raw_mode()?;
        self.raw = true;
        tracing::debug!("raw mode enabled");
        Ok(())
    }

    /// Block until the next key the selector cares about.
    ///
    /// Ctrl+C never returns: the terminal is restored and the process
    /// exits with [`INTERRUPT_EXIT_CODE`].
    pub fn next_key(&mut self) -> Result<Key> {
        loop {
            let Some(event) = self.source.read_event()? else {
                return Err(SelectorError::InputClosed);
            };
            match decode(&event) {
                Decoded::Key(key) => return Ok(key),
                Decoded::Interrupt => self.interrupt(),
                Decoded::Ignored => tracing::trace!("ignored event {event:?}"),
            }
        }
    }

    /// Leave raw mode. Safe to call any number of times.
    pub fn stop(&mut self) -> Result<()> {
        if !self.raw {
            return Ok(());
        }
        self.raw = false;
        self.source.disable_raw_mode()?;
        tracing::debug!("raw mode disabled");
        Ok(())
    }

    /// Size of the terminal behind the source, see [`InputSource::terminal_size`].
    pub fn terminal_size(&self) -> Option<(u16, u16)> {
        self.source.terminal_size()
    }

    /// Whether raw mode is currently held.
    pub fn is_active(&self) -> bool {
        self.raw
    }

    fn interrupt(&mut self) -> ! {
        tracing::debug!("interrupted");
        if let Err(err) = self.stop() {
            tracing::warn!("failed to leave raw mode: {err}");
        }
        let mut stdout = io::stdout();
        ansi::cursor_show(&mut stdout).ok();
        stdout.flush().ok();
        process::exit(INTERRUPT_EXIT_CODE);
    }
}

impl<S: InputSource> Drop for KeyboardDecoder<S> {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            tracing::warn!("failed to leave raw mode: {err}");
        }
    }
}
