//! Keyboard input.
//!
//! - [`reader`] - raw mode and the event source seam
//! - [`keyboard`] - decoding events into selector keys
//! - [`text_edit`] - the editable filter buffer

pub mod keyboard;
pub mod reader;
pub mod text_edit;

pub use keyboard::{Decoded, Key, decode};
pub use reader::{INTERRUPT_EXIT_CODE, InputSource, KeyboardDecoder, TerminalInput};
pub use text_edit::FilterInput;
