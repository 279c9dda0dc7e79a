//! Restricted markup parser.
//!
//! Recognizes `**bold**`, `*italic*`, `` `code` `` and newlines, in that
//! precedence. Each pass only scans the plain text left over by the previous
//! passes, so spans never nest or overlap. A span never crosses a newline.

use std::sync::OnceLock;

use regex::Regex;

/// One tagged piece of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Bold(String),
    Italic(String),
    Code(String),
    LineBreak,
}

impl Segment {
    /// Raw text carried by the segment; empty for line breaks.
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Bold(text) | Self::Italic(text) | Self::Code(text) => text,
            Self::LineBreak => "",
        }
    }
}

#[derive(Clone, Copy)]
enum SpanKind {
    Bold,
    Italic,
    Code,
}

impl SpanKind {
    fn regex(self) -> &'static Regex {
        static BOLD: OnceLock<Regex> = OnceLock::new();
        static ITALIC: OnceLock<Regex> = OnceLock::new();
        static CODE: OnceLock<Regex> = OnceLock::new();

        let (cell, pattern) = match self {
            Self::Bold => (&BOLD, r"\*\*(.*?)\*\*"),
            Self::Italic => (&ITALIC, r"\*(.*?)\*"),
            Self::Code => (&CODE, r"`(.*?)`"),
        };
        cell.get_or_init(|| Regex::new(pattern).expect("markup regex must compile"))
    }

    fn segment(self, text: &str) -> Segment {
        match self {
            Self::Bold => Segment::Bold(text.to_string()),
            Self::Italic => Segment::Italic(text.to_string()),
            Self::Code => Segment::Code(text.to_string()),
        }
    }
}

const PASSES: [SpanKind; 3] = [SpanKind::Bold, SpanKind::Italic, SpanKind::Code];

/// Splits `input` into segments. Never fails; unmatched markers stay literal.
pub fn parse_markup(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    for (index, line) in input.split('\n').enumerate() {
        if index > 0 {
            segments.push(Segment::LineBreak);
        }
        let mut line_segments = vec![Segment::Plain(line.to_string())];
        for kind in PASSES {
            line_segments = apply_pass(line_segments, kind);
        }
        segments.extend(
            line_segments
                .into_iter()
                .filter(|segment| !matches!(segment, Segment::Plain(text) if text.is_empty())),
        );
    }
    segments
}

fn apply_pass(segments: Vec<Segment>, kind: SpanKind) -> Vec<Segment> {
    let regex = kind.regex();
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        let Segment::Plain(text) = segment else {
            out.push(segment);
            continue;
        };

        let mut cursor = 0;
        for captures in regex.captures_iter(&text) {
            let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            if whole.start() > cursor {
                out.push(Segment::Plain(text[cursor..whole.start()].to_string()));
            }
            out.push(kind.segment(inner.as_str()));
            cursor = whole.end();
        }
        if cursor < text.len() || cursor == 0 {
            out.push(Segment::Plain(text[cursor..].to_string()));
        }
    }
    out
}
