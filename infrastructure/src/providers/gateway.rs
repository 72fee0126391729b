//! Gateway that opens client handles for a configured provider.

use super::gemini::GeminiClient;
use super::http::build_http_client;
use super::huggingface::HuggingFaceClient;
use super::openai::OpenAiClient;
use crate::config::{ProviderKind, ProviderSettings};
use async_trait::async_trait;
use chatgate_application::{
    CompletionGateway, CompletionProvider, ConfigurationError, ProviderError,
};
use std::sync::Arc;
use tracing::info;

/// [`CompletionGateway`] for one of the hosted HTTP APIs.
///
/// Credentials are re-read on every `connect`, so rotating the env var
/// takes effect on the next session.
pub struct ApiGateway {
    settings: ProviderSettings,
}

impl ApiGateway {
    pub fn new(settings: ProviderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }
}

#[async_trait]
impl CompletionGateway for ApiGateway {
    fn provider_name(&self) -> &str {
        self.settings.kind.as_str()
    }

    fn verify_credentials(&self) -> Result<(), ConfigurationError> {
        self.settings.resolve_api_key().map(|_| ())
    }

    async fn connect(&self) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
        let api_key = self
            .settings
            .resolve_api_key()
            .map_err(|e| ProviderError::AuthenticationFailed(e.to_string()))?;
        let http = build_http_client()?;
        let base_url = self.settings.base_url.clone();

        info!(
            "Opening {} client ({})",
            self.settings.kind, self.settings.base_url
        );

        let client: Arc<dyn CompletionProvider> = match self.settings.kind {
            ProviderKind::Gemini => Arc::new(GeminiClient::new(http, api_key, base_url)),
            ProviderKind::HuggingFace => Arc::new(HuggingFaceClient::new(http, api_key, base_url)),
            ProviderKind::OpenAi => Arc::new(OpenAiClient::new(http, api_key, base_url)),
        };
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileProvidersConfig;

    fn gateway(provider: &str, api_key: Option<&str>) -> ApiGateway {
        let mut settings = FileProvidersConfig::default().settings(provider).unwrap();
        settings.api_key_env = "CHATGATE_TEST_UNSET_KEY_VAR".to_string();
        settings.api_key = api_key.map(str::to_string);
        ApiGateway::new(settings)
    }

    #[test]
    fn test_missing_credentials_fail_verification() {
        let gateway = gateway("gemini", None);
        assert!(matches!(
            gateway.verify_credentials(),
            Err(ConfigurationError::MissingCredentials { .. })
        ));
    }

    #[tokio::test]
    async fn test_connect_without_credentials_is_auth_failure() {
        let gateway = gateway("openai", None);
        assert!(matches!(
            gateway.connect().await,
            Err(ProviderError::AuthenticationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_connect_opens_matching_client() {
        for (provider, name) in [
            ("gemini", "gemini"),
            ("hf", "huggingface"),
            ("openai", "openai"),
        ] {
            let gateway = gateway(provider, Some("test-key"));
            assert_eq!(gateway.provider_name(), name);
            assert!(gateway.verify_credentials().is_ok());

            let client = gateway.connect().await.unwrap();
            assert_eq!(client.name(), name);
        }
    }
}
