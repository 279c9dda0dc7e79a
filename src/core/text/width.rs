//! Grapheme width and visible width helpers.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::ansi::strip_ansi;

pub const TAB_WIDTH: usize = 3;

pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme == "\t" {
        return TAB_WIDTH;
    }
    UnicodeWidthStr::width(grapheme)
}

/// Terminal column width of `input`, ignoring ANSI control sequences.
pub fn visible_width(input: &str) -> usize {
    if input.is_empty() {
        return 0;
    }

    strip_ansi(input).graphemes(true).map(grapheme_width).sum()
}

#[cfg(test)]
mod tests {
    use super::visible_width;

    #[test]
    fn ansi_ignored_in_width() {
        let input = "hi\x1b[31m!!\x1b[0m";
        assert_eq!(visible_width(input), 4);
    }

    #[test]
    fn osc8_ignored_in_width() {
        let input = "\x1b]8;;https://example.com\x07link\x1b]8;;\x07";
        assert_eq!(visible_width(input), 4);
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(visible_width("日本"), 4);
        assert_eq!(visible_width("🤖"), 2);
    }

    #[test]
    fn tab_uses_fixed_width() {
        assert_eq!(visible_width("a\tb"), 5);
    }
}
