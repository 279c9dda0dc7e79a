//! Append-only transcript store.
//!
//! The store assigns ids and timestamps; callers only ever see shared
//! references, so messages cannot change after they are appended. `reset` is
//! the only other mutation and always leaves exactly the welcome message.

use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime};

pub const WELCOME_TEXT: &str = "🤖 **Welcome to Cyber Bot!**\n\nI can help you with:\n• 🔍 Search attack patterns\n• 🛡️ Check file hashes with VirusTotal\n• 📊 Get statistics\n• ❓ Provide help\n\nType `help` to see all commands!";

/// Unique within a session and strictly increasing, across resets too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub origin: Origin,
    pub text: String,
    pub created_at: OffsetDateTime,
    /// Assistant replies only; `None` for user entries and the welcome message.
    pub outcome: Option<Outcome>,
    pub category: Option<String>,
}

/// Message contents before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    origin: Origin,
    text: String,
    created_at: Option<OffsetDateTime>,
    outcome: Option<Outcome>,
    category: Option<String>,
}

impl MessageDraft {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::User,
            text: text.into(),
            created_at: None,
            outcome: None,
            category: None,
        }
    }

    pub fn assistant(text: impl Into<String>, success: bool) -> Self {
        Self {
            origin: Origin::Assistant,
            text: text.into(),
            created_at: None,
            outcome: Some(Outcome { success }),
            category: None,
        }
    }

    fn welcome() -> Self {
        Self {
            origin: Origin::Assistant,
            text: WELCOME_TEXT.to_string(),
            created_at: None,
            outcome: None,
            category: None,
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_created_at(mut self, created_at: OffsetDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
    generation: u64,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        let mut transcript = Self {
            messages: Vec::new(),
            next_id: 1,
            generation: 0,
        };
        transcript.append(MessageDraft::welcome());
        transcript
    }

    pub fn append(&mut self, draft: MessageDraft) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message {
            id,
            origin: draft.origin,
            text: draft.text,
            created_at: draft.created_at.unwrap_or_else(OffsetDateTime::now_utc),
            outcome: draft.outcome,
            category: draft.category,
        });
        id
    }

    /// Replaces the history with a fresh welcome message and bumps the generation.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.generation += 1;
        self.append(MessageDraft::welcome());
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Incremented on every reset; unchanged by appends.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Parses a reply timestamp, falling back to the local clock.
///
/// Accepts RFC 3339 and offset-less ISO 8601; the latter is taken as UTC.
pub fn parse_reply_timestamp(raw: Option<&str>) -> OffsetDateTime {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| {
            OffsetDateTime::parse(value, &Rfc3339).ok().or_else(|| {
                PrimitiveDateTime::parse(value, &Iso8601::DEFAULT)
                    .ok()
                    .map(PrimitiveDateTime::assume_utc)
            })
        })
        .unwrap_or_else(OffsetDateTime::now_utc)
}
