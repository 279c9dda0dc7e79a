//! Terminal styling functions.

pub type StyleFn = Box<dyn Fn(&str) -> String + Send + Sync>;

const RESET_INTENSITY: &str = "\x1b[22m";
const RESET_ITALIC: &str = "\x1b[23m";
const RESET_FG: &str = "\x1b[39m";

pub struct MarkupTheme {
    pub bold: StyleFn,
    pub italic: StyleFn,
    pub code: StyleFn,
    pub user_header: StyleFn,
    pub bot_header: StyleFn,
    pub muted: StyleFn,
    pub chip: StyleFn,
    pub error: StyleFn,
}

impl MarkupTheme {
    /// Theme that leaves text untouched (`NO_COLOR`).
    pub fn plain() -> Self {
        Self {
            bold: identity(),
            italic: identity(),
            code: identity(),
            user_header: identity(),
            bot_header: identity(),
            muted: identity(),
            chip: Box::new(|text| format!("[{text}]")),
            error: identity(),
        }
    }

    pub fn from_env(no_color: bool) -> Self {
        if no_color {
            Self::plain()
        } else {
            Self::default()
        }
    }
}

impl Default for MarkupTheme {
    fn default() -> Self {
        Self {
            bold: Box::new(|text| format!("\x1b[1m{text}{RESET_INTENSITY}")),
            italic: Box::new(|text| format!("\x1b[3m{text}{RESET_ITALIC}")),
            code: Box::new(|text| format!("\x1b[36m{text}{RESET_FG}")),
            user_header: Box::new(|text| format!("\x1b[1;34m{text}\x1b[0m")),
            bot_header: Box::new(|text| format!("\x1b[1;32m{text}\x1b[0m")),
            muted: Box::new(|text| format!("\x1b[2m{text}{RESET_INTENSITY}")),
            chip: Box::new(|text| format!("\x1b[7m {text} \x1b[27m")),
            error: Box::new(|text| format!("\x1b[31m{text}{RESET_FG}")),
        }
    }
}

fn identity() -> StyleFn {
    Box::new(|text| text.to_string())
}
