//! Dismissible error banner.

use std::sync::Arc;

use crate::core::component::Component;
use crate::markup::layout_segments;
use crate::markup::Segment;
use crate::render::MarkupTheme;

pub const DISMISS_HINT: &str = "(type /dismiss to hide)";

pub struct ErrorBanner {
    cause: String,
    theme: Arc<MarkupTheme>,
}

impl ErrorBanner {
    pub fn new(cause: impl Into<String>, theme: Arc<MarkupTheme>) -> Self {
        Self {
            cause: cause.into(),
            theme,
        }
    }
}

impl Component for ErrorBanner {
    fn render(&mut self, width: usize) -> Vec<String> {
        // The cause is shown verbatim: no markup, control characters stripped.
        let segments = [
            Segment::Bold("⚠ Error:".to_string()),
            Segment::Plain(format!(" {}", self.cause)),
        ];
        let mut lines: Vec<String> = layout_segments(&segments, width)
            .render(&self.theme)
            .into_iter()
            .map(|line| (self.theme.error)(&line))
            .collect();
        lines.push((self.theme.muted)(DISMISS_HINT));
        lines
    }
}
