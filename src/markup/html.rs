//! HTML target. All segment text is escaped; tags come only from segment kinds.

use super::parse::{parse_markup, Segment};

/// Escapes the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn segments_to_html(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Plain(text) => out.push_str(&escape_html(text)),
            Segment::Bold(text) => wrap(&mut out, "strong", text),
            Segment::Italic(text) => wrap(&mut out, "em", text),
            Segment::Code(text) => wrap(&mut out, "code", text),
            Segment::LineBreak => out.push_str("<br>"),
        }
    }
    out
}

/// Renders message text to an HTML fragment.
pub fn render_html(input: &str) -> String {
    segments_to_html(&parse_markup(input))
}

fn wrap(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&escape_html(text));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
