//! Control-character stripping for untrusted text bound for a terminal.

use super::width::TAB_WIDTH;

/// Returns `true` for C0 controls, DEL and C1 controls (ESC included).
pub fn is_control(ch: char) -> bool {
    matches!(ch, '\u{0}'..='\u{1f}' | '\u{7f}'..='\u{9f}')
}

/// Drops every control character so untrusted text cannot emit escape
/// sequences. Tabs expand to spaces; newlines are dropped as well, line
/// breaks are structural and come from the markup parser.
pub fn sanitize_terminal_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch == '\t' {
            out.extend(std::iter::repeat(' ').take(TAB_WIDTH));
        } else if !is_control(ch) {
            out.push(ch);
        }
    }
    out
}
