use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user_id: None,
            session_id: None,
        }
    }

    pub fn with_identity(
        mut self,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        self.user_id = Some(user_id.into());
        self.session_id = Some(session_id.into());
        self
    }
}

/// Reply of `POST /chat`.
///
/// `success` and `message` are required; a body missing either is malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub command_type: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Reply of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub uptime: Option<String>,
    #[serde(default)]
    pub total_commands: Option<u64>,
    /// Percentage in `0..=100`, sent as a bare number.
    #[serde(default)]
    pub success_rate: Option<f64>,
}

/// Reply of `GET /stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotStats {
    pub total_commands: u64,
    pub successful_commands: u64,
    pub failed_commands: u64,
    #[serde(default)]
    pub most_used_commands: BTreeMap<String, u64>,
    #[serde(default)]
    pub uptime: Option<String>,
}

/// One entry of the command catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInfo {
    pub description: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Reply of `GET /commands`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandCatalog {
    pub available_commands: BTreeMap<String, CommandInfo>,
    #[serde(default)]
    pub total_commands: Option<u64>,
    #[serde(default)]
    pub bot_version: Option<String>,
}
