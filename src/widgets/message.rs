//! Transcript entry widget.

use std::sync::Arc;

use crate::core::component::Component;
use crate::core::text::sanitize::sanitize_terminal_text;
use crate::markup::{layout_segments, parse_markup};
use crate::render::MarkupTheme;

const BODY_INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Bot,
}

impl Author {
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Bot => "Cyber Bot",
        }
    }
}

/// Header plus markup body for one message.
pub struct MessageView {
    author: Author,
    text: String,
    time_label: String,
    category: Option<String>,
    failed: bool,
    theme: Arc<MarkupTheme>,
}

impl MessageView {
    pub fn new(
        author: Author,
        text: impl Into<String>,
        time_label: impl Into<String>,
        theme: Arc<MarkupTheme>,
    ) -> Self {
        Self {
            author,
            text: text.into(),
            time_label: time_label.into(),
            category: None,
            failed: false,
            theme,
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category.filter(|value| !value.trim().is_empty());
        self
    }

    /// Marks an unsuccessful assistant reply.
    pub fn with_failed(mut self, failed: bool) -> Self {
        self.failed = failed;
        self
    }

    fn header(&self) -> String {
        let theme = &self.theme;
        let name = match self.author {
            Author::User => (theme.user_header)(self.author.label()),
            Author::Bot => (theme.bot_header)(&format!("🤖 {}", self.author.label())),
        };
        let mut header = format!("{name} {}", (theme.muted)(&self.time_label));
        if let Some(category) = self.category.as_deref() {
            header.push(' ');
            header.push_str(&(theme.chip)(&sanitize_terminal_text(category)));
        }
        if self.failed {
            header.push(' ');
            header.push_str(&(theme.error)("✗"));
        }
        header
    }
}

impl Component for MessageView {
    fn render(&mut self, width: usize) -> Vec<String> {
        let body_width = width.saturating_sub(BODY_INDENT.len()).max(1);
        let body = layout_segments(&parse_markup(&self.text), body_width);

        let mut lines = vec![self.header()];
        lines.extend(
            body.render(&self.theme)
                .into_iter()
                .map(|line| format!("{BODY_INDENT}{line}")),
        );
        lines
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{Author, MessageView};
    use crate::core::component::Component;
    use crate::core::text::width::visible_width;
    use crate::render::MarkupTheme;

    #[test]
    fn bot_message_shows_header_chip_and_indented_body() {
        let mut view = MessageView::new(
            Author::Bot,
            "**Commands**\nhelp",
            "10:00",
            Arc::new(MarkupTheme::plain()),
        )
        .with_category(Some("help".to_string()));

        assert_eq!(
            view.render(40),
            vec!["🤖 Cyber Bot 10:00 [help]", "  Commands", "  help"]
        );
    }

    #[test]
    fn failed_reply_header_marks_failure() {
        let mut view = MessageView::new(
            Author::Bot,
            "down",
            "10:01",
            Arc::new(MarkupTheme::plain()),
        )
        .with_failed(true);

        assert_eq!(view.render(20)[0], "🤖 Cyber Bot 10:01 ✗");
    }

    #[test]
    fn body_lines_fit_width() {
        let mut view = MessageView::new(
            Author::User,
            "one two three four five six",
            "09:00",
            Arc::new(MarkupTheme::default()),
        );

        let lines = view.render(12);
        assert!(lines[1..].iter().all(|line| visible_width(line) <= 12));
    }

    #[test]
    fn same_view_rewraps_for_each_width() {
        let mut view = MessageView::new(
            Author::User,
            "one two three four",
            "09:00",
            Arc::new(MarkupTheme::plain()),
        );

        assert_eq!(view.render(40), vec!["You 09:00", "  one two three four"]);
        assert_eq!(
            view.render(12),
            vec!["You 09:00", "  one two", "  three four"]
        );
    }

    #[test]
    fn blank_category_is_hidden() {
        let mut view = MessageView::new(Author::User, "hi", "09:00", Arc::new(MarkupTheme::plain()))
            .with_category(Some("  ".to_string()));
        assert_eq!(view.render(20)[0], "You 09:00");
    }
}
