use std::io::{self, BufRead};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::Context;
use chat_session::app::App;
use chat_session::config::ChatConfig;
use chat_session::providers;
use chat_session::runtime::{Command, RuntimeController, RuntimeHandle};
use chat_session::tui::{self, TerminalView};
use chat_widget::config::EnvConfig;
use chat_widget::{logging, MarkupTheme};
use time::UtcOffset;

fn main() -> anyhow::Result<()> {
    // Must run before any other thread exists.
    let local_offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    let env = EnvConfig::from_env();
    logging::init(&env).context("failed to open log file")?;

    let config = ChatConfig::from_env().context("invalid cyber-chat configuration")?;
    let provider = providers::provider_from_config(&config)
        .context("failed to initialize assistant provider")?;
    let profile = provider.profile();
    let identity = config.identity();
    tracing::info!(
        target: "chat_session",
        provider = %profile.provider_id,
        endpoint = %profile.endpoint,
        session_id = %identity.session_id,
        "session started"
    );

    let app = Arc::new(Mutex::new(App::new(identity)));
    let (runtime_handle, receiver) = RuntimeHandle::channel();
    let host = RuntimeController::new(Arc::clone(&app), runtime_handle.clone(), provider);

    thread::Builder::new()
        .name("cyber-chat-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => runtime_handle.dispatch(Command::Input(line)),
                    Err(error) => {
                        tracing::warn!(target: "chat_session", %error, "stdin read failed");
                        break;
                    }
                }
            }
            runtime_handle.dispatch(Command::InputClosed);
        })
        .context("failed to spawn stdin reader")?;

    let theme = Arc::new(MarkupTheme::from_env(env.no_color));
    let mut view = TerminalView::new(theme, tui::terminal_width(), local_offset);
    let mut stdout = io::stdout().lock();
    tui::run(&app, &host, &receiver, &mut view, &mut stdout)?;

    Ok(())
}
