//! Terminal target: sanitized, word-wrapped, themed lines.

use unicode_segmentation::UnicodeSegmentation;

use super::parse::{parse_markup, Segment};
use crate::core::text::sanitize::sanitize_terminal_text;
use crate::core::text::width::{grapheme_width, visible_width};
use crate::render::{Frame, Line, MarkupTheme, SpanStyle};

/// Lays out segments into lines no wider than `width` columns.
///
/// Text is sanitized first; words longer than the width are broken at
/// grapheme boundaries. Each line break segment starts a new line.
pub fn layout_segments(segments: &[Segment], width: usize) -> Frame {
    let width = width.max(1);
    let mut wrapper = Wrapper::new(width);

    for segment in segments {
        let style = match segment {
            Segment::Plain(_) => SpanStyle::Plain,
            Segment::Bold(_) => SpanStyle::Bold,
            Segment::Italic(_) => SpanStyle::Italic,
            Segment::Code(_) => SpanStyle::Code,
            Segment::LineBreak => {
                wrapper.break_line();
                continue;
            }
        };
        let clean = sanitize_terminal_text(segment.text());
        for token in clean.split_word_bounds() {
            wrapper.push_token(token, style);
        }
    }

    wrapper.finish()
}

/// Parses, lays out and styles `input` for a terminal `width` columns wide.
pub fn render_terminal(input: &str, width: usize, theme: &MarkupTheme) -> Vec<String> {
    layout_segments(&parse_markup(input), width).render(theme)
}

struct Wrapper {
    width: usize,
    lines: Vec<Line>,
    current: Line,
    current_width: usize,
    pending_space: Option<(String, SpanStyle)>,
}

impl Wrapper {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            current: Line::default(),
            current_width: 0,
            pending_space: None,
        }
    }

    fn break_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        self.lines.push(line);
        self.current_width = 0;
        self.pending_space = None;
    }

    fn push_token(&mut self, token: &str, style: SpanStyle) {
        if token.chars().all(char::is_whitespace) {
            match self.pending_space.as_mut() {
                Some((space, _)) => space.push_str(token),
                None => self.pending_space = Some((token.to_string(), style)),
            }
            return;
        }

        let token_width = visible_width(token);
        let space_width = self
            .pending_space
            .as_ref()
            .map_or(0, |(space, _)| visible_width(space));

        if self.current_width + space_width + token_width > self.width {
            // Whitespace at a wrap point is dropped.
            if self.current_width > 0 {
                self.break_line();
            }
            self.pending_space = None;
        }
        if let Some((space, space_style)) = self.pending_space.take() {
            self.current.push(&space, space_style);
            self.current_width += space_width;
        }

        if self.current_width + token_width <= self.width {
            self.current.push(token, style);
            self.current_width += token_width;
            return;
        }

        for grapheme in token.graphemes(true) {
            let width = grapheme_width(grapheme);
            if self.current_width + width > self.width && self.current_width > 0 {
                self.break_line();
            }
            self.current.push(grapheme, style);
            self.current_width += width;
        }
    }

    fn finish(mut self) -> Frame {
        self.lines.push(self.current);
        Frame::new(self.lines)
    }
}
