//! # awsp
//!
//! Inline fuzzy selector for AWS profiles.
//!
//! The selector draws a filterable table directly below the shell prompt
//! using plain VT escape sequences. No alternate screen and no prompt
//! framework are involved. Raw mode is held only while the selector runs and
//! is released on every exit path.
//!
//! ## Architecture
//!
//! ```text
//! profiles ──► FuzzySearcher ──┐
//!          └─► TableLayout ────┤
//!                              ▼
//! KeyboardDecoder ──► Selector (SelectorState) ──► InlineRenderer ──► terminal
//! ```
//!
//! ## Modules
//!
//! - [`profiles`] - AWS config parsing and SSO session status
//! - [`search`] - Bitap fuzzy search over the profile list
//! - [`layout`] - Column widths, borders and row formatting
//! - [`input`] - Raw mode, key decoding and the filter text buffer
//! - [`renderer`] - ANSI output and in-place inline repaint
//! - [`selector`] - The controller tying it all together
//! - [`shell_init`] - Shell helper snippets

pub mod error;
pub mod input;
pub mod layout;
pub mod profiles;
pub mod renderer;
pub mod search;
pub mod selector;
pub mod shell_init;
pub mod types;

pub use error::{Result, SelectorError};
pub use input::{InputSource, Key, KeyboardDecoder, TerminalInput};
pub use layout::TableLayout;
pub use profiles::{Profile, SessionCache, SessionStatus, load_profiles};
pub use renderer::{Frame, InlineRenderer, OutputBuffer};
pub use search::{FuzzySearcher, SearchOptions};
pub use selector::{Outcome, Selector, SelectorOptions};
pub use types::{Attr, Color};
