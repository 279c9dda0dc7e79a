//! Environment configuration.

use std::env;

#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// File receiving tracing output; logging is discarded when unset.
    pub log_file: Option<String>,
    pub debug: bool,
    /// Any non-empty `NO_COLOR` disables styling.
    pub no_color: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            log_file: env_value("CHAT_WIDGET_LOG"),
            debug: env_flag("CHAT_WIDGET_DEBUG"),
            no_color: env_value("NO_COLOR").is_some(),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env_value(key).as_deref() == Some("1")
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
