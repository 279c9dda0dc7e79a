//! Rendering pipeline.

pub mod frame;
pub mod theme;

pub use frame::{Frame, Line, Span, SpanStyle};
pub use theme::{MarkupTheme, StyleFn};
