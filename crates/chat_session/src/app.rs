use assistant_provider::{RequestId, TurnKind, TurnReply, TurnRequest};

use crate::commands::{parse_slash_command, SlashCommand};
use crate::identity::SessionIdentity;
use crate::transcript::{parse_reply_timestamp, MessageDraft, Transcript};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Pending { request_id: RequestId },
    Exiting,
}

pub trait HostOps {
    /// Issues exactly one outbound call. `Err` means the call never started.
    fn start_request(&mut self, request: TurnRequest) -> Result<(), String>;
    fn request_render(&mut self);
    fn request_stop(&mut self);
}

pub const FAILURE_TEXT: &str =
    "❌ **Error:** Unable to connect to the bot. Please make sure the backend server is running.";
pub const HELP_TEXT: &str =
    "Commands: /help, /health, /stats, /commands, /clear, /dismiss, /quit. Anything else is sent to Cyber Bot.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub mode: Mode,
    pub transcript: Transcript,
    /// Dismissible error banner holding the last failure cause.
    pub error: Option<String>,
    /// Local status line; never part of the transcript.
    pub notice: Option<String>,
    pub should_exit: bool,
    identity: SessionIdentity,
    next_request_id: RequestId,
    discarded_request: Option<RequestId>,
}

impl App {
    pub fn new(identity: SessionIdentity) -> Self {
        Self {
            mode: Mode::Idle,
            transcript: Transcript::new(),
            error: None,
            notice: None,
            should_exit: false,
            identity,
            next_request_id: 1,
            discarded_request: None,
        }
    }

    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.mode, Mode::Pending { .. })
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        match self.mode {
            Mode::Pending { request_id } => Some(request_id),
            _ => None,
        }
    }

    /// Handles one line of user input: a session command or a chat turn.
    ///
    /// Blank input, and any turn submitted while a request is pending, is ignored.
    pub fn on_submit(&mut self, raw_text: &str, host: &mut dyn HostOps) {
        let trimmed = raw_text.trim();
        if trimmed.is_empty() || self.should_exit {
            return;
        }

        let Some(command) = parse_slash_command(trimmed) else {
            self.begin_turn(
                raw_text,
                TurnKind::Chat {
                    message: raw_text.to_string(),
                },
                host,
            );
            return;
        };

        match command {
            SlashCommand::Help => {
                self.notice = Some(HELP_TEXT.to_string());
                host.request_render();
            }
            SlashCommand::Clear => self.reset(host),
            SlashCommand::Dismiss => self.dismiss_error(host),
            SlashCommand::Quit => self.on_quit(host),
            SlashCommand::Probe(probe) => {
                self.begin_turn(trimmed, TurnKind::Probe(probe), host);
            }
            SlashCommand::Unknown(command) => {
                self.notice = Some(format!("Unknown command: {command}"));
                host.request_render();
            }
        }
    }

    fn begin_turn(&mut self, shown_text: &str, kind: TurnKind, host: &mut dyn HostOps) {
        if self.mode != Mode::Idle {
            return;
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;

        self.transcript.append(MessageDraft::user(shown_text));
        self.error = None;
        self.notice = None;
        self.mode = Mode::Pending { request_id };

        let request = TurnRequest {
            request_id,
            kind,
            user_id: self.identity.user_id.clone(),
            session_id: self.identity.session_id.clone(),
        };
        if let Err(error) = host.start_request(request) {
            self.on_failure(request_id, &error);
        }

        host.request_render();
    }

    pub fn on_reply(&mut self, request_id: RequestId, reply: TurnReply) {
        if !self.settle(request_id) {
            return;
        }

        let created_at = parse_reply_timestamp(reply.timestamp.as_deref());
        self.transcript.append(
            MessageDraft::assistant(reply.message, reply.success)
                .with_category(reply.category)
                .with_created_at(created_at),
        );
    }

    pub fn on_failure(&mut self, request_id: RequestId, error: &str) {
        if !self.settle(request_id) {
            return;
        }

        self.transcript
            .append(MessageDraft::assistant(FAILURE_TEXT, false));
        self.error = Some(error.to_string());
    }

    /// Returns to `Idle` for the pending request; `false` when the outcome
    /// must not be recorded (stale id, exiting, or discarded by a reset).
    fn settle(&mut self, request_id: RequestId) -> bool {
        if self.pending_request() != Some(request_id) {
            return false;
        }

        self.mode = Mode::Idle;
        if self.discarded_request == Some(request_id) {
            self.discarded_request = None;
            return false;
        }
        true
    }

    /// Clears the transcript back to the welcome message and drops the banner.
    ///
    /// A request already in flight keeps the session pending; its outcome is
    /// discarded when it arrives.
    pub fn reset(&mut self, host: &mut dyn HostOps) {
        self.transcript.reset();
        self.error = None;
        self.notice = None;
        if let Mode::Pending { request_id } = self.mode {
            self.discarded_request = Some(request_id);
        }
        host.request_render();
    }

    pub fn dismiss_error(&mut self, host: &mut dyn HostOps) {
        self.error = None;
        host.request_render();
    }

    pub fn on_quit(&mut self, host: &mut dyn HostOps) {
        self.mode = Mode::Exiting;
        self.should_exit = true;
        host.request_stop();
        host.request_render();
    }
}
