use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::identity::SessionIdentity;

pub const CONFIG_PATH_ENV: &str = "CYBER_CHAT_CONFIG_PATH";
pub const PROVIDER_ENV: &str = "CYBER_CHAT_PROVIDER";
pub const BASE_URL_ENV: &str = "CYBER_CHAT_BASE_URL";
pub const TIMEOUT_ENV: &str = "CYBER_CHAT_TIMEOUT_SEC";
pub const USER_ID_ENV: &str = "CYBER_CHAT_USER_ID";
pub const SESSION_ID_ENV: &str = "CYBER_CHAT_SESSION_ID";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported provider '{0}'; expected 'http' or 'mock'")]
    InvalidProvider(String),

    #[error("invalid timeout '{0}'; expected a whole number of seconds greater than zero")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Http,
    Mock,
}

impl ProviderKind {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "mock" => Ok(Self::Mock),
            _ => Err(ConfigError::InvalidProvider(raw.trim().to_string())),
        }
    }
}

/// On-disk shape of the optional JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    provider: Option<ProviderKind>,
    base_url: Option<String>,
    timeout_sec: Option<u64>,
    user_id: Option<String>,
    session_id: Option<String>,
}

/// Resolved session settings.
///
/// Values come from defaults, then the JSON file named by
/// `CYBER_CHAT_CONFIG_PATH`, then individual `CYBER_CHAT_*` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub provider: ProviderKind,
    pub base_url: String,
    pub timeout: Duration,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Http,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_id: None,
            session_id: None,
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let lookup = |key: &str| std::env::var(key).ok();
        let path = non_empty(lookup(CONFIG_PATH_ENV)).map(PathBuf::from);
        Self::from_sources(path.as_deref(), lookup)
    }

    pub fn from_sources(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = path {
            config.apply_file(read_file_config(path)?)?;
        }

        if let Some(provider) = non_empty(lookup(PROVIDER_ENV)) {
            config.provider = ProviderKind::parse(&provider)?;
        }
        if let Some(base_url) = non_empty(lookup(BASE_URL_ENV)) {
            config.base_url = base_url;
        }
        if let Some(timeout) = non_empty(lookup(TIMEOUT_ENV)) {
            config.timeout = parse_timeout(&timeout)?;
        }
        if let Some(user_id) = non_empty(lookup(USER_ID_ENV)) {
            config.user_id = Some(user_id);
        }
        if let Some(session_id) = non_empty(lookup(SESSION_ID_ENV)) {
            config.session_id = Some(session_id);
        }

        Ok(config)
    }

    /// Session identity for this run; missing ids are generated.
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity::resolve(self.user_id.clone(), self.session_id.clone())
    }

    fn apply_file(&mut self, file: FileConfig) -> Result<(), ConfigError> {
        if let Some(provider) = file.provider {
            self.provider = provider;
        }
        if let Some(base_url) = non_empty(file.base_url) {
            self.base_url = base_url;
        }
        if let Some(timeout_sec) = file.timeout_sec {
            if timeout_sec == 0 {
                return Err(ConfigError::InvalidTimeout(timeout_sec.to_string()));
            }
            self.timeout = Duration::from_secs(timeout_sec);
        }
        if let Some(user_id) = non_empty(file.user_id) {
            self.user_id = Some(user_id);
        }
        if let Some(session_id) = non_empty(file.session_id) {
            self.session_id = Some(session_id);
        }
        Ok(())
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Duration::from_secs(seconds)),
        _ => Err(ConfigError::InvalidTimeout(raw.trim().to_string())),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let config = ChatConfig::from_sources(None, lookup_from(&[])).expect("defaults");

        assert_eq!(config, ChatConfig::default());
        assert_eq!(config.provider, ProviderKind::Http);
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn file_values_are_applied() {
        let file = write_config(
            r#"{"provider":"mock","base_url":"http://bot:9000","timeout_sec":5,"user_id":"u1","session_id":"s1"}"#,
        );

        let config = ChatConfig::from_sources(Some(file.path()), lookup_from(&[])).expect("file");

        assert_eq!(config.provider, ProviderKind::Mock);
        assert_eq!(config.base_url, "http://bot:9000");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_id.as_deref(), Some("u1"));
        assert_eq!(config.session_id.as_deref(), Some("s1"));
    }

    #[test]
    fn env_overrides_file() {
        let file = write_config(r#"{"provider":"mock","base_url":"http://bot:9000"}"#);
        let lookup = lookup_from(&[
            (PROVIDER_ENV, "HTTP"),
            (BASE_URL_ENV, " http://other:8000 "),
            (TIMEOUT_ENV, "12"),
        ]);

        let config = ChatConfig::from_sources(Some(file.path()), lookup).expect("merged");

        assert_eq!(config.provider, ProviderKind::Http);
        assert_eq!(config.base_url, "http://other:8000");
        assert_eq!(config.timeout, Duration::from_secs(12));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let lookup = lookup_from(&[(BASE_URL_ENV, "  "), (USER_ID_ENV, "")]);

        let config = ChatConfig::from_sources(None, lookup).expect("blank");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.user_id.is_none());
    }

    #[test]
    fn unknown_file_fields_are_rejected() {
        let file = write_config(r#"{"provider":"http","api_key":"secret"}"#);

        let error = ChatConfig::from_sources(Some(file.path()), lookup_from(&[]))
            .expect_err("unknown field");

        assert!(matches!(error, ConfigError::Parse { .. }));
        assert!(error.to_string().contains("api_key"));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.json");

        let error =
            ChatConfig::from_sources(Some(&path), lookup_from(&[])).expect_err("missing file");

        assert!(matches!(error, ConfigError::Read { .. }));
        assert!(error.to_string().contains("missing.json"));
    }

    #[test]
    fn invalid_provider_and_timeout_are_rejected() {
        let provider = ChatConfig::from_sources(None, lookup_from(&[(PROVIDER_ENV, "grpc")]))
            .expect_err("provider");
        assert!(matches!(provider, ConfigError::InvalidProvider(ref value) if value == "grpc"));

        let zero = ChatConfig::from_sources(None, lookup_from(&[(TIMEOUT_ENV, "0")]))
            .expect_err("zero timeout");
        assert!(matches!(zero, ConfigError::InvalidTimeout(_)));

        let text = ChatConfig::from_sources(None, lookup_from(&[(TIMEOUT_ENV, "soon")]))
            .expect_err("text timeout");
        assert_eq!(
            text.to_string(),
            "invalid timeout 'soon'; expected a whole number of seconds greater than zero"
        );

        let file = write_config(r#"{"timeout_sec":0}"#);
        let file_zero = ChatConfig::from_sources(Some(file.path()), lookup_from(&[]))
            .expect_err("file zero timeout");
        assert!(matches!(file_zero, ConfigError::InvalidTimeout(_)));
    }

    #[test]
    fn identity_uses_configured_ids() {
        let config = ChatConfig::from_sources(
            None,
            lookup_from(&[(USER_ID_ENV, "user_1"), (SESSION_ID_ENV, "session_1")]),
        )
        .expect("identity");

        let identity = config.identity();
        assert_eq!(identity.user_id, "user_1");
        assert_eq!(identity.session_id, "session_1");
    }
}
