//! HTTP implementation of the shared `assistant_provider` contract.
//!
//! This adapter drives the async `assistant_api` client from the session's
//! worker threads and flattens every transport outcome into a `TurnReply` or
//! a human-readable failure cause.

use std::sync::Arc;
use std::time::Duration;

use assistant_api::{
    AssistantApiClient, AssistantApiConfig, AssistantApiError, BotStats, ChatRequest,
    ChatResponse, CommandCatalog, HealthReport,
};
use assistant_provider::{
    AssistantProvider, ProbeKind, ProviderInitError, ProviderProfile, TurnKind, TurnReply,
    TurnRequest,
};

/// Stable provider identifier used by `chat_session` startup selection.
pub const HTTP_PROVIDER_ID: &str = "http";

/// Runtime configuration for the HTTP provider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpProviderConfig {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    pub timeout: Option<Duration>,
}

impl HttpProviderConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn into_api_config(self) -> AssistantApiConfig {
        let mut config = AssistantApiConfig::default();

        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }

        if let Some(user_agent) = self.user_agent {
            config = config.with_user_agent(user_agent);
        }

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        config
    }
}

trait BotClient: Send + Sync {
    fn endpoint(&self) -> String;
    fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AssistantApiError>;
    fn health(&self) -> Result<HealthReport, AssistantApiError>;
    fn stats(&self) -> Result<BotStats, AssistantApiError>;
    fn commands(&self) -> Result<CommandCatalog, AssistantApiError>;
}

#[derive(Debug)]
struct DefaultBotClient {
    client: AssistantApiClient,
}

impl DefaultBotClient {
    fn block_on<F, T>(&self, future: F) -> Result<T, AssistantApiError>
    where
        F: std::future::Future<Output = Result<T, AssistantApiError>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| {
                AssistantApiError::Runtime(format!("failed to initialize tokio runtime: {error}"))
            })?;

        runtime.block_on(future)
    }
}

impl BotClient for DefaultBotClient {
    fn endpoint(&self) -> String {
        self.client.bot_url()
    }

    fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AssistantApiError> {
        self.block_on(self.client.chat(request))
    }

    fn health(&self) -> Result<HealthReport, AssistantApiError> {
        self.block_on(self.client.health())
    }

    fn stats(&self) -> Result<BotStats, AssistantApiError> {
        self.block_on(self.client.stats())
    }

    fn commands(&self) -> Result<CommandCatalog, AssistantApiError> {
        self.block_on(self.client.commands())
    }
}

/// `AssistantProvider` backed by the Cyber Bot HTTP API.
pub struct HttpProvider {
    client: Arc<dyn BotClient>,
}

impl HttpProvider {
    /// Creates a provider using real HTTP transport.
    pub fn new(config: HttpProviderConfig) -> Result<Self, ProviderInitError> {
        let client = AssistantApiClient::new(config.into_api_config())
            .map_err(|error| ProviderInitError::new(error.to_string()))?;

        Ok(Self {
            client: Arc::new(DefaultBotClient { client }),
        })
    }

    #[cfg(test)]
    fn with_client_for_tests(client: Arc<dyn BotClient>) -> Self {
        Self { client }
    }

    fn send_probe(&self, probe: ProbeKind) -> Result<TurnReply, AssistantApiError> {
        let message = match probe {
            ProbeKind::Health => format_health(&self.client.health()?),
            ProbeKind::Stats => format_stats(&self.client.stats()?),
            ProbeKind::Commands => format_commands(&self.client.commands()?),
        };
        Ok(TurnReply::new(true, message).with_category(probe.as_str()))
    }
}

impl AssistantProvider for HttpProvider {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: HTTP_PROVIDER_ID.to_string(),
            endpoint: self.client.endpoint(),
        }
    }

    fn send(&self, req: TurnRequest) -> Result<TurnReply, String> {
        let request_id = req.request_id;
        let outcome = match req.kind {
            TurnKind::Chat { message } => {
                let body = ChatRequest::new(message).with_identity(req.user_id, req.session_id);
                self.client.chat(&body).map(reply_from_chat)
            }
            TurnKind::Probe(probe) => self.send_probe(probe),
        };

        outcome.map_err(|error| {
            tracing::warn!(target: "assistant_provider_http", request_id, %error, "turn failed");
            error.to_string()
        })
    }
}

fn reply_from_chat(response: ChatResponse) -> TurnReply {
    TurnReply {
        success: response.success,
        message: response.message,
        category: response.command_type,
        timestamp: response.timestamp,
    }
}

fn format_health(report: &HealthReport) -> String {
    let mut lines = vec![format!("🩺 **Status:** {}", report.status)];
    if let Some(message) = non_empty(report.message.as_deref()) {
        lines.push(message.to_string());
    }
    if let Some(uptime) = non_empty(report.uptime.as_deref()) {
        lines.push(format!("**Uptime:** {uptime}"));
    }
    if let Some(total) = report.total_commands {
        lines.push(format!("**Total commands:** {total}"));
    }
    if let Some(rate) = report.success_rate.filter(|rate| rate.is_finite()) {
        lines.push(format!("**Success rate:** {rate:.1}%"));
    }
    lines.join("\n")
}

fn format_stats(stats: &BotStats) -> String {
    let mut text = format!(
        "📊 **Bot Statistics**\n\n**Total commands:** {}\n**Successful:** {}\n**Failed:** {}",
        stats.total_commands, stats.successful_commands, stats.failed_commands
    );
    if let Some(uptime) = non_empty(stats.uptime.as_deref()) {
        text.push_str(&format!("\n**Uptime:** {uptime}"));
    }

    if !stats.most_used_commands.is_empty() {
        let mut ranked: Vec<(&String, &u64)> = stats.most_used_commands.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        text.push_str("\n\n**Most used:**");
        for (command, count) in ranked {
            text.push_str(&format!("\n• `{command}`: {count}"));
        }
    }
    text
}

fn format_commands(catalog: &CommandCatalog) -> String {
    let mut text = match non_empty(catalog.bot_version.as_deref()) {
        Some(version) => format!("❓ **Available commands** (v{version})"),
        None => "❓ **Available commands**".to_string(),
    };
    for (name, info) in &catalog.available_commands {
        text.push_str(&format!("\n• `{name}`: {}", info.description));
        if !info.examples.is_empty() {
            let examples: Vec<String> = info
                .examples
                .iter()
                .map(|example| format!("`{example}`"))
                .collect();
            text.push_str(&format!("\n  *e.g.* {}", examples.join(", ")));
        }
    }
    text
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
