//! Restricted message markup: parsing and the two safe output targets.

pub mod html;
pub mod parse;
pub mod terminal;

pub use html::{escape_html, render_html};
pub use parse::{parse_markup, Segment};
pub use terminal::{layout_segments, render_terminal};
