//! Minimal provider-agnostic contract for resolving a single assistant turn.
//!
//! This crate defines only the request/reply lifecycle shared by the chat
//! session and its transports. It excludes wire payloads, HTTP details and
//! session state; those live in `assistant_api` and `chat_session`.

use std::fmt;

/// Identifier for one outbound assistant request.
pub type RequestId = u64;

/// Error returned while constructing/configuring a provider before any turn starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInitError {
    message: String,
}

impl ProviderInitError {
    /// Creates a new provider initialization error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ProviderInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ProviderInitError {}

impl From<String> for ProviderInitError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ProviderInitError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Read-only service endpoints that resolve like a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    Health,
    Stats,
    Commands,
}

impl ProbeKind {
    /// Stable label used as the reply category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Stats => "stats",
            Self::Commands => "commands",
        }
    }
}

/// What a turn asks the assistant for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnKind {
    /// Free-text message forwarded verbatim.
    Chat { message: String },
    /// Service probe (health, statistics, command catalog).
    Probe(ProbeKind),
}

/// Input required to resolve one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    pub request_id: RequestId,
    pub kind: TurnKind,
    pub user_id: String,
    pub session_id: String,
}

impl TurnRequest {
    /// Builds a chat turn.
    #[must_use]
    pub fn chat(
        request_id: RequestId,
        message: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            request_id,
            kind: TurnKind::Chat {
                message: message.into(),
            },
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }

    /// Builds a probe turn.
    #[must_use]
    pub fn probe(
        request_id: RequestId,
        probe: ProbeKind,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            request_id,
            kind: TurnKind::Probe(probe),
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }
}

/// Well-formed assistant reply.
///
/// `timestamp` is the raw server-reported value; parsing (and the fallback to
/// the local clock) is the session's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    pub success: bool,
    pub message: String,
    pub category: Option<String>,
    pub timestamp: Option<String>,
}

impl TurnReply {
    #[must_use]
    pub fn new(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            category: None,
            timestamp: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// Terminal lifecycle event for a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    Replied {
        request_id: RequestId,
        reply: TurnReply,
    },
    Failed {
        request_id: RequestId,
        error: String,
    },
}

impl TurnEvent {
    /// Returns the request identifier associated with this event.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        match self {
            Self::Replied { request_id, .. } | Self::Failed { request_id, .. } => *request_id,
        }
    }
}

/// Immutable metadata describing a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub provider_id: String,
    pub endpoint: String,
}

/// Provider interface for resolving one turn.
pub trait AssistantProvider: Send + Sync + 'static {
    /// Returns provider identity metadata.
    fn profile(&self) -> ProviderProfile;

    /// Resolves a turn. Blocks the calling thread until the reply or failure is known.
    ///
    /// Every transport failure (network, status, malformed body, timeout) is
    /// reported as `Err` with a human-readable cause.
    fn send(&self, req: TurnRequest) -> Result<TurnReply, String>;
}
