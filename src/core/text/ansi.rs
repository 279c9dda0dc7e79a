//! ANSI escape sequence recognition.
//!
//! Only used to skip styling codes when measuring width; untrusted text is
//! sanitized before styling, so every sequence seen here was emitted by a theme.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiCodeKind {
    Csi,
    Osc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsiCode {
    pub code: String,
    pub length: usize,
    pub kind: AnsiCodeKind,
}

pub fn extract_ansi_code(input: &str, pos: usize) -> Option<AnsiCode> {
    let bytes = input.as_bytes();
    if pos + 1 >= bytes.len() || bytes[pos] != 0x1b {
        return None;
    }

    match bytes[pos + 1] {
        b'[' => extract_csi(input, pos),
        b']' => extract_osc(input, pos),
        _ => None,
    }
}

fn extract_csi(input: &str, pos: usize) -> Option<AnsiCode> {
    let bytes = input.as_bytes();
    let mut idx = pos + 2;
    while idx < bytes.len() {
        if (0x40..=0x7e).contains(&bytes[idx]) {
            let end = idx + 1;
            return Some(AnsiCode {
                code: input[pos..end].to_string(),
                length: end - pos,
                kind: AnsiCodeKind::Csi,
            });
        }
        idx += 1;
    }
    None
}

fn extract_osc(input: &str, pos: usize) -> Option<AnsiCode> {
    let bytes = input.as_bytes();
    let mut idx = pos + 2;
    while idx < bytes.len() {
        let end = if bytes[idx] == 0x07 {
            Some(idx + 1)
        } else if bytes[idx] == 0x1b && bytes.get(idx + 1) == Some(&b'\\') {
            Some(idx + 2)
        } else {
            None
        };
        if let Some(end) = end {
            return Some(AnsiCode {
                code: input[pos..end].to_string(),
                length: end - pos,
                kind: AnsiCodeKind::Osc,
            });
        }
        idx += 1;
    }
    None
}

/// Removes every recognized escape sequence, keeping the visible text.
pub fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut idx = 0;
    while idx < input.len() {
        if let Some(ansi) = extract_ansi_code(input, idx) {
            idx += ansi.length;
            continue;
        }
        let Some(ch) = input[idx..].chars().next() else {
            break;
        };
        out.push(ch);
        idx += ch.len_utf8();
    }
    out
}
