use std::collections::BTreeMap;
use std::time::Duration;

use crate::url::DEFAULT_BASE_URL;

/// Default per-request timeout. A timed-out call is reported like any other transport failure.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport configuration for Cyber Bot API requests.
#[derive(Debug, Clone)]
pub struct AssistantApiConfig {
    /// Service base URL; the bot prefix is appended during normalization.
    pub base_url: String,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Additional headers sent with every request.
    pub extra_headers: BTreeMap<String, String>,
    /// Request timeout, `None` disables it.
    pub timeout: Option<Duration>,
}

impl Default for AssistantApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: None,
            extra_headers: BTreeMap::new(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl AssistantApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }
}
