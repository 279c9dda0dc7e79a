//! Typed render model.
//!
//! `Span`/`Line`/`Frame` carry sanitized text tagged with a style; SGR codes
//! are only added when a frame is rendered through a [`MarkupTheme`].

use crate::core::text::width::visible_width;
use crate::render::theme::MarkupTheme;

/// Visual treatment of a span.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SpanStyle {
    #[default]
    Plain,
    Bold,
    Italic,
    Code,
}

/// A contiguous run of text with one style.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Span {
    text: String,
    style: SpanStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanStyle::Plain)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> SpanStyle {
        self.style
    }

    pub fn width(&self) -> usize {
        visible_width(&self.text)
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn styled(&self, theme: &MarkupTheme) -> String {
        match self.style {
            SpanStyle::Plain => self.text.clone(),
            SpanStyle::Bold => (theme.bold)(&self.text),
            SpanStyle::Italic => (theme.italic)(&self.text),
            SpanStyle::Code => (theme.code)(&self.text),
        }
    }
}

/// A single rendered line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Line {
    spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|span| span.as_str().is_empty())
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// Appends text, merging into the last span when the style matches.
    pub fn push(&mut self, text: &str, style: SpanStyle) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style() == style => last.push_str(text),
            _ => self.spans.push(Span::new(text, style)),
        }
    }

    /// Text with styling omitted.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(Span::as_str).collect()
    }

    pub fn render(&self, theme: &MarkupTheme) -> String {
        self.spans.iter().map(|span| span.styled(theme)).collect()
    }
}

/// A rendered frame (collection of lines).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Frame {
    lines: Vec<Line>,
}

impl Frame {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    pub fn render(&self, theme: &MarkupTheme) -> Vec<String> {
        self.lines.iter().map(|line| line.render(theme)).collect()
    }
}

impl From<Vec<Line>> for Frame {
    fn from(lines: Vec<Line>) -> Self {
        Self::new(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_merges_adjacent_spans_of_same_style() {
        let mut line = Line::default();
        line.push("a", SpanStyle::Plain);
        line.push("b", SpanStyle::Plain);
        line.push("c", SpanStyle::Bold);
        line.push("", SpanStyle::Italic);

        assert_eq!(line.spans().len(), 2);
        assert_eq!(line.plain_text(), "abc");
        assert_eq!(line.width(), 3);
    }

    #[test]
    fn render_applies_theme_per_span() {
        let mut line = Line::default();
        line.push("x ", SpanStyle::Plain);
        line.push("y", SpanStyle::Code);

        let theme = MarkupTheme {
            code: Box::new(|text| format!("[{text}]")),
            ..MarkupTheme::plain()
        };
        assert_eq!(line.render(&theme), "x [y]");
    }

    #[test]
    fn frame_renders_every_line() {
        let frame = Frame::new(vec![Line::new(vec![Span::plain("one")]), Line::default()]);
        assert_eq!(frame.render(&MarkupTheme::plain()), vec!["one", ""]);
    }
}
