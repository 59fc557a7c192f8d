//! Terminal renderer - the in-place output layer.
//!
//! The renderer knows only about finished lines. It doesn't understand
//! profiles, filtering or selection. It takes a [`Frame`] and repaints it
//! below the shell prompt with plain VT escape sequences.
//!
//! # Architecture
//!
//! ```text
//!   Selector state ──► Layout (row strings) ──► Frame
//!                                                 │
//!                                                 ▼
//!                                        ┌────────────────┐
//!                                        │ InlineRenderer │  ← This module
//!                                        └────────────────┘
//!                                                 │
//!                                                 ▼
//!                                             Terminal
//! ```
//!
//! # Key Properties
//!
//! 1. **Full line rewrite**: every painted line is erased before writing
//! 2. **Output batching**: one write per frame
//! 3. **Synchronized output**: flicker-free with the terminal sync protocol
//! 4. **No history scroll**: repaints move up over the previous frame

pub mod ansi;
mod inline;
mod output;
pub mod style;

pub use inline::{CURSOR_GLYPH, Frame, InlineRenderer, PROMPT_LABEL, prompt_line};
pub use output::OutputBuffer;
pub use style::{Style, palette};
