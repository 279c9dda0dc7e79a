use std::sync::Arc;

use assistant_provider::{AssistantProvider, ProviderInitError};
use assistant_provider_http::{HttpProvider, HttpProviderConfig};
use assistant_provider_mock::MockProvider;

use crate::config::{ChatConfig, ProviderKind};

pub const USER_AGENT: &str = concat!("cyber-chat/", env!("CARGO_PKG_VERSION"));

pub fn provider_from_config(
    config: &ChatConfig,
) -> Result<Arc<dyn AssistantProvider>, ProviderInitError> {
    match config.provider {
        ProviderKind::Mock => Ok(Arc::new(MockProvider::default())),
        ProviderKind::Http => {
            let provider = HttpProvider::new(
                HttpProviderConfig::default()
                    .with_base_url(config.base_url.clone())
                    .with_user_agent(USER_AGENT)
                    .with_timeout(config.timeout),
            )?;
            Ok(Arc::new(provider))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_provider_is_selected_explicitly() {
        let config = ChatConfig {
            provider: ProviderKind::Mock,
            ..ChatConfig::default()
        };

        let provider = provider_from_config(&config).expect("mock provider should resolve");
        assert_eq!(provider.profile().provider_id, "mock");
    }

    #[test]
    fn http_provider_targets_normalized_bot_url() {
        let config = ChatConfig {
            base_url: "http://bot.internal:9000/".to_string(),
            ..ChatConfig::default()
        };

        let provider = provider_from_config(&config).expect("http provider should resolve");
        let profile = provider.profile();
        assert_eq!(profile.provider_id, "http");
        assert_eq!(profile.endpoint, "http://bot.internal:9000/api/v1/bot");
    }

    #[test]
    fn http_provider_rejects_non_http_base() {
        let config = ChatConfig {
            base_url: "ftp://bot.internal".to_string(),
            ..ChatConfig::default()
        };

        let error = match provider_from_config(&config) {
            Ok(_) => panic!("non-http base urls should fail"),
            Err(error) => error,
        };
        assert!(error.message().contains("ftp://bot.internal"));
    }
}
