//! Inline, line-oriented terminal front end.
//!
//! The view prints transcript entries once, as they are appended, and keeps a
//! single transient status line (the thinking indicator) at the bottom that is
//! cleared before anything else is written.

use std::io::{self, Write};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chat_widget::{Author, Component, ErrorBanner, MarkupTheme, MessageView, ThinkingIndicator};
use time::macros::format_description;
use time::UtcOffset;

use crate::app::App;
use crate::runtime::{lock_unpoisoned, Command, RuntimeController};
use crate::transcript::{Message, Origin};

pub const DEFAULT_WIDTH: usize = 80;
const MIN_WIDTH: usize = 20;
const TICK_INTERVAL: Duration = Duration::from_millis(80);

const CLEAR_LINE: &str = "\r\x1b[2K";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Width of the terminal attached to stdout.
///
/// Falls back to `COLUMNS`, then [`DEFAULT_WIDTH`], when stdout is not a TTY.
pub fn terminal_width() -> usize {
    resolve_width(
        stdout_columns(),
        std::env::var("COLUMNS").ok().as_deref(),
    )
}

fn resolve_width(columns: Option<u16>, columns_env: Option<&str>) -> usize {
    columns
        .map(usize::from)
        .or_else(|| columns_env.and_then(|value| value.trim().parse::<usize>().ok()))
        .filter(|width| *width > 0)
        .unwrap_or(DEFAULT_WIDTH)
        .max(MIN_WIDTH)
}

#[cfg(unix)]
fn stdout_columns() -> Option<u16> {
    read_winsize(libc::STDOUT_FILENO).map(|(columns, _rows)| columns)
}

#[cfg(not(unix))]
fn stdout_columns() -> Option<u16> {
    None
}

#[cfg(unix)]
fn read_winsize(fd: libc::c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

pub struct TerminalView {
    theme: Arc<MarkupTheme>,
    width: usize,
    local_offset: UtcOffset,
    generation: Option<u64>,
    printed: usize,
    banner: Option<String>,
    notice: Option<String>,
    loader: ThinkingIndicator,
    loader_visible: bool,
}

impl TerminalView {
    /// `local_offset` is resolved once by the caller, before any threads start.
    pub fn new(theme: Arc<MarkupTheme>, width: usize, local_offset: UtcOffset) -> Self {
        Self {
            loader: ThinkingIndicator::new(Arc::clone(&theme)),
            theme,
            width: width.max(MIN_WIDTH),
            local_offset,
            generation: None,
            printed: 0,
            banner: None,
            notice: None,
            loader_visible: false,
        }
    }

    /// Brings the terminal up to date with `app`.
    pub fn draw(&mut self, app: &App, out: &mut impl Write) -> io::Result<()> {
        self.clear_loader(out)?;

        let generation = app.transcript.generation();
        if self.generation != Some(generation) {
            if self.generation.is_some() {
                out.write_all(CLEAR_SCREEN.as_bytes())?;
            }
            self.generation = Some(generation);
            self.printed = 0;
            self.banner = None;
            self.notice = None;
        }

        let messages = app.transcript.messages();
        for message in messages.iter().skip(self.printed) {
            for line in self.message_view(message).render(self.width) {
                writeln!(out, "{line}")?;
            }
        }
        self.printed = messages.len();

        if app.error != self.banner {
            if let Some(cause) = app.error.as_deref() {
                let mut banner = ErrorBanner::new(cause, Arc::clone(&self.theme));
                for line in banner.render(self.width) {
                    writeln!(out, "{line}")?;
                }
            }
            self.banner = app.error.clone();
        }

        if app.notice != self.notice {
            if let Some(notice) = app.notice.as_deref() {
                writeln!(out, "{}", (self.theme.muted)(notice))?;
            }
            self.notice = app.notice.clone();
        }

        if app.is_pending() {
            self.loader.reset();
            self.write_loader(out)?;
        }

        out.flush()
    }

    /// Advances the thinking indicator when it is on screen.
    pub fn tick(&mut self, out: &mut impl Write) -> io::Result<()> {
        if !self.loader_visible {
            return Ok(());
        }

        self.loader.tick();
        out.write_all(CLEAR_LINE.as_bytes())?;
        self.write_loader(out)?;
        out.flush()
    }

    pub fn finish(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.clear_loader(out)?;
        out.flush()
    }

    fn write_loader(&mut self, out: &mut impl Write) -> io::Result<()> {
        if let Some(line) = self.loader.render(self.width).first() {
            write!(out, "{line}")?;
        }
        self.loader_visible = true;
        Ok(())
    }

    fn clear_loader(&mut self, out: &mut impl Write) -> io::Result<()> {
        if self.loader_visible {
            out.write_all(CLEAR_LINE.as_bytes())?;
            self.loader_visible = false;
        }
        Ok(())
    }

    fn message_view(&self, message: &Message) -> MessageView {
        let author = match message.origin {
            Origin::User => Author::User,
            Origin::Assistant => Author::Bot,
        };
        let time_label = message
            .created_at
            .to_offset(self.local_offset)
            .format(format_description!("[hour]:[minute]"))
            .unwrap_or_default();

        MessageView::new(
            author,
            message.text.as_str(),
            time_label,
            Arc::clone(&self.theme),
        )
        .with_category(message.category.clone())
        .with_failed(message.outcome.is_some_and(|outcome| !outcome.success))
    }
}

/// Runs the front-end loop until the session exits or input ends.
///
/// Input closing while a request is pending waits for that request to settle.
pub fn run(
    app: &Arc<Mutex<App>>,
    host: &Arc<RuntimeController>,
    receiver: &Receiver<Command>,
    view: &mut TerminalView,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut host = Arc::clone(host);
    let mut input_closed = false;
    let mut stop_requested = false;

    view.draw(&lock_unpoisoned(app), out)?;

    loop {
        match receiver.recv_timeout(TICK_INTERVAL) {
            Ok(Command::Input(line)) => {
                lock_unpoisoned(app).on_submit(&line, &mut host);
            }
            Ok(Command::InputClosed) => input_closed = true,
            Ok(Command::DrainEvents) => {
                host.drain_pending_events();
            }
            Ok(Command::RequestRender) => {}
            Ok(Command::RequestStop) => stop_requested = true,
            Err(RecvTimeoutError::Timeout) => {
                view.tick(out)?;
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }

        let app = lock_unpoisoned(app);
        view.draw(&app, out)?;
        if stop_requested || app.should_exit || (input_closed && !app.is_pending()) {
            break;
        }
    }

    tracing::debug!(target: "chat_session", input_closed, stop_requested, "front end stopped");
    view.finish(out)
}
