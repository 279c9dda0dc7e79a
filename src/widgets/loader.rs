//! Pending-request indicator.

use std::sync::Arc;

use crate::core::component::Component;
use crate::render::MarkupTheme;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const THINKING_MESSAGE: &str = "Cyber Bot is thinking...";

/// Spinner line advanced by the caller's loop via [`ThinkingIndicator::tick`].
pub struct ThinkingIndicator {
    message: String,
    frame: usize,
    theme: Arc<MarkupTheme>,
}

impl ThinkingIndicator {
    pub fn new(theme: Arc<MarkupTheme>) -> Self {
        Self {
            message: THINKING_MESSAGE.to_string(),
            frame: 0,
            theme,
        }
    }

    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn reset(&mut self) {
        self.frame = 0;
    }
}

impl Component for ThinkingIndicator {
    fn render(&mut self, _width: usize) -> Vec<String> {
        vec![format!(
            "{} {}",
            (self.theme.code)(SPINNER_FRAMES[self.frame]),
            (self.theme.muted)(&self.message)
        )]
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::ThinkingIndicator;
    use crate::core::component::Component;
    use crate::render::MarkupTheme;

    #[test]
    fn tick_advances_and_wraps_spinner() {
        let mut loader = ThinkingIndicator::new(Arc::new(MarkupTheme::plain()));
        assert_eq!(loader.render(80), vec!["⠋ Cyber Bot is thinking..."]);

        loader.tick();
        assert_eq!(loader.render(80), vec!["⠙ Cyber Bot is thinking..."]);

        for _ in 0..9 {
            loader.tick();
        }
        assert_eq!(loader.render(80), vec!["⠋ Cyber Bot is thinking..."]);
    }
}
