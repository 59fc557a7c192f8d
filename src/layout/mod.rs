//! Layout Module
//!
//! Pure computation of the profile table: column widths, borders and the
//! row formatters the selector uses for every repaint.
//!
//! # Example
//!
//! ```
//! use awsp::layout::TableLayout;
//! use awsp::profiles::Profile;
//!
//! let profiles = vec![Profile::new("dev", "111111111111")];
//! let layout = TableLayout::new(&profiles);
//! let row = layout.format_selected_row(&profiles[0], false);
//! assert!(row.contains("dev"));
//! ```

mod table;
mod text_measure;

pub use table::{HEADER_ROWS, TableLayout};
pub use text_measure::{clip_to_width, pad_to_width, string_width};
