//! Presentation layer for the Cyber Bot chat session.
//!
//! # Public API Overview
//! - Parse restricted message markup into tagged [`Segment`]s.
//! - Render segments safely to HTML ([`render_html`]) or to themed terminal lines
//!   ([`render_terminal`]).
//! - Compose transcript output from [`MessageView`], [`ErrorBanner`] and
//!   [`ThinkingIndicator`] components.
//! - Use text and width helpers for ANSI-safe formatting.
//!
//! Invariant: untrusted text never reaches an output target without passing through
//! the target's escape (HTML) or sanitize (terminal) primitive.

pub mod config;
pub mod logging;

pub mod core;
pub mod markup;
pub mod render;
pub mod widgets;

/// Runtime component trait.
pub use crate::core::component::Component;
/// Markup parsing and safe rendering.
pub use crate::markup::{escape_html, parse_markup, render_html, render_terminal, Segment};
/// Render-layer frame and theme types.
pub use crate::render::{Frame, Line, MarkupTheme, Span, SpanStyle};
/// Built-in chat widgets.
pub use crate::widgets::{Author, ErrorBanner, MessageView, ThinkingIndicator};

/// Control-character stripping for terminal output.
pub use crate::core::text::sanitize::sanitize_terminal_text;
/// Visible width helper that ignores ANSI control sequences.
pub use crate::core::text::width::visible_width;
