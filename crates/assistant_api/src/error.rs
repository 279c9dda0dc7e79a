use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantApiError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("malformed response body: {0}")]
    MalformedBody(String),
    #[error("{0}")]
    Runtime(String),
}

impl AssistantApiError {
    /// Maps a transport error, keeping timeouts distinguishable.
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(error)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    detail: Option<Value>,
}

/// Extracts a human-readable cause from an error body.
///
/// Understands `{"detail": "..."}` and validation lists of the form
/// `{"detail": [{"msg": "..."}]}`; any other body is returned raw, and an
/// empty body falls back to the status reason.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            body.trim().to_string()
        }
    };

    let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) else {
        return fallback();
    };

    match payload.detail {
        Some(Value::String(detail)) if !detail.trim().is_empty() => detail,
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .filter(|msg| !msg.is_empty())
                .collect();
            if messages.is_empty() {
                fallback()
            } else {
                messages.join("; ")
            }
        }
        _ => fallback(),
    }
}
