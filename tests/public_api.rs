#![allow(unused_imports)]

use chat_widget::config::EnvConfig;
use chat_widget::logging;
use chat_widget::{
    escape_html, parse_markup, render_html, render_terminal, sanitize_terminal_text,
    visible_width, Author, Component, ErrorBanner, Frame, Line, MarkupTheme, MessageView,
    Segment, Span, SpanStyle, ThinkingIndicator,
};

#[test]
fn public_api_exports_compile() {}
