//! Tracing subscriber setup.
//!
//! Stdout belongs to the chat view, so log output goes to the file named by
//! `CHAT_WIDGET_LOG` (appended) and is discarded when that is unset.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::EnvConfig;

/// Default filter directive for the given config; `RUST_LOG` overrides it.
pub fn default_filter(config: &EnvConfig) -> &'static str {
    if config.debug {
        "debug"
    } else {
        "info"
    }
}

/// Installs the global subscriber. Returns `Ok(false)` when no log file is
/// configured, or when a subscriber was already installed.
pub fn init(config: &EnvConfig) -> io::Result<bool> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(path, "logging initialized");
    }
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::{default_filter, init};
    use crate::config::EnvConfig;

    #[test]
    fn debug_flag_lowers_default_filter() {
        let mut config = EnvConfig::default();
        assert_eq!(default_filter(&config), "info");
        config.debug = true;
        assert_eq!(default_filter(&config), "debug");
    }

    #[test]
    fn init_without_log_file_is_a_no_op() {
        assert!(!init(&EnvConfig::default()).expect("no io"));
    }
}
