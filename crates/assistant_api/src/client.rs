use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::AssistantApiConfig;
use crate::error::{parse_error_message, AssistantApiError};
use crate::payload::{BotStats, ChatRequest, ChatResponse, CommandCatalog, HealthReport};
use crate::url::{endpoint_url, normalize_bot_url, BotEndpoint};

#[derive(Debug)]
pub struct AssistantApiClient {
    http: Client,
    config: AssistantApiConfig,
}

impl AssistantApiClient {
    pub fn new(config: AssistantApiConfig) -> Result<Self, AssistantApiError> {
        let base = config.base_url.trim();
        if !base.is_empty() && !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(AssistantApiError::InvalidBaseUrl(base.to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(AssistantApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AssistantApiConfig {
        &self.config
    }

    /// Normalized bot prefix, e.g. `http://localhost:8000/api/v1/bot`.
    pub fn bot_url(&self) -> String {
        normalize_bot_url(&self.config.base_url)
    }

    pub fn endpoint(&self, endpoint: BotEndpoint) -> String {
        endpoint_url(&self.config.base_url, endpoint)
    }

    pub fn build_headers(&self) -> Result<HeaderMap, AssistantApiError> {
        let mut out = HeaderMap::new();
        if let Some(user_agent) = self.config.user_agent.as_deref() {
            out.insert(
                USER_AGENT,
                HeaderValue::from_str(user_agent).map_err(|_| {
                    AssistantApiError::InvalidHeader(format!("invalid user agent: {user_agent}"))
                })?,
            );
        }
        for (key, value) in &self.config.extra_headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes())
                    .map_err(|_| AssistantApiError::InvalidHeader(format!("invalid key: {key}")))?,
                HeaderValue::from_str(value).map_err(|_| {
                    AssistantApiError::InvalidHeader(format!("invalid value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_chat_request(
        &self,
        request: &ChatRequest,
    ) -> Result<RequestBuilder, AssistantApiError> {
        let headers = self.build_headers()?;
        Ok(self
            .http
            .post(self.endpoint(BotEndpoint::Chat))
            .headers(headers)
            .json(request))
    }

    pub fn build_probe_request(
        &self,
        endpoint: BotEndpoint,
    ) -> Result<RequestBuilder, AssistantApiError> {
        let headers = self.build_headers()?;
        Ok(self.http.get(self.endpoint(endpoint)).headers(headers))
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AssistantApiError> {
        tracing::debug!(
            target: "assistant_api",
            endpoint = %self.endpoint(BotEndpoint::Chat),
            "sending chat request"
        );
        self.execute(self.build_chat_request(request)?).await
    }

    pub async fn health(&self) -> Result<HealthReport, AssistantApiError> {
        self.execute(self.build_probe_request(BotEndpoint::Health)?)
            .await
    }

    pub async fn stats(&self) -> Result<BotStats, AssistantApiError> {
        self.execute(self.build_probe_request(BotEndpoint::Stats)?)
            .await
    }

    pub async fn commands(&self) -> Result<CommandCatalog, AssistantApiError> {
        self.execute(self.build_probe_request(BotEndpoint::Commands)?)
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, AssistantApiError> {
        let response = request
            .send()
            .await
            .map_err(AssistantApiError::from_transport)?;
        let response = ensure_success(response).await?;
        let body = response
            .text()
            .await
            .map_err(AssistantApiError::from_transport)?;
        serde_json::from_str(&body).map_err(|error| {
            tracing::warn!(target: "assistant_api", %error, "reply body did not parse");
            AssistantApiError::MalformedBody(error.to_string())
        })
    }
}

async fn ensure_success(response: Response) -> Result<Response, AssistantApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = parse_error_message(status, &body);
    tracing::warn!(target: "assistant_api", status = status.as_u16(), %message, "request failed");
    Err(AssistantApiError::Status { status, message })
}
