//! Cyber Bot chat session: transcript, request lifecycle and terminal front end.
//!
//! ## Provider bootstrap
//!
//! `chat_session` selects its provider at startup:
//!
//! - `CYBER_CHAT_PROVIDER=http` (default) talks to the Cyber Bot service
//! - `CYBER_CHAT_PROVIDER=mock` answers from a deterministic local script
//!
//! Settings may also come from a UTF-8 JSON file named by
//! `CYBER_CHAT_CONFIG_PATH`; individual variables override the file:
//!
//! ```json
//! {
//!   "provider": "http",
//!   "base_url": "http://localhost:8000",
//!   "timeout_sec": 30,
//!   "user_id": "analyst_1",
//!   "session_id": "incident-42"
//! }
//! ```
//!
//! Contract notes:
//! - `base_url` may be the service root, `.../api/v1` or `.../api/v1/bot`.
//! - `timeout_sec` must be > 0 when provided.
//! - When no session id is configured a random one is generated per run.
//! - Unknown JSON fields are rejected.
//!
//! ## Lifecycle
//!
//! [`app::App`] is a pure state machine: at most one request is in flight, the
//! user entry is appended before the call starts, and every call resolves to
//! exactly one assistant entry. [`runtime::RuntimeController`] runs each call on
//! a worker thread and feeds the outcome back through the front-end queue.

pub mod app;
pub mod commands;
pub mod config;
pub mod identity;
pub mod providers;
pub mod runtime;
pub mod transcript;
pub mod tui;
