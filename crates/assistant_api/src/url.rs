/// Default base URL for the Cyber Bot service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const API_PREFIX: &str = "/api/v1";
const BOT_PREFIX: &str = "/bot";

/// Endpoints exposed under the bot prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotEndpoint {
    Chat,
    Health,
    Stats,
    Commands,
}

impl BotEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Health => "health",
            Self::Stats => "stats",
            Self::Commands => "commands",
        }
    }
}

/// Normalize a base URL to the bot endpoint prefix.
///
/// Normalization rules:
/// 1) keep `/api/v1/bot` unchanged
/// 2) append `/bot` when path ends in `/api/v1`
/// 3) append `/api/v1/bot` otherwise
pub fn normalize_bot_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with("/api/v1/bot") {
        return trimmed.to_string();
    }
    if trimmed.ends_with(API_PREFIX) {
        return format!("{trimmed}{BOT_PREFIX}");
    }
    format!("{trimmed}{API_PREFIX}{BOT_PREFIX}")
}

/// Full URL for one bot endpoint.
pub fn endpoint_url(base_url: &str, endpoint: BotEndpoint) -> String {
    format!("{}/{}", normalize_bot_url(base_url), endpoint.path())
}
