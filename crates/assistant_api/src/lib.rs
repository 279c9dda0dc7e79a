//! Transport-only client for the Cyber Bot HTTP API.
//!
//! This crate owns request building, response parsing and error mapping for
//! the `/api/v1/bot` endpoints. It contains no session state and no UI
//! coupling; `assistant_provider_http` adapts it to the provider contract.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod url;

pub use client::AssistantApiClient;
pub use config::AssistantApiConfig;
pub use error::AssistantApiError;
pub use payload::{BotStats, ChatRequest, ChatResponse, CommandCatalog, CommandInfo, HealthReport};
pub use url::{normalize_bot_url, BotEndpoint};
