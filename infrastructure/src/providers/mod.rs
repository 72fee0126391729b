//! Provider adapters for the hosted completion APIs.
//!
//! Each client implements the
//! [`CompletionProvider`](chatgate_application::CompletionProvider) port and
//! hides its vendor's request and response shapes; [`ApiGateway`] opens them.

mod http;

pub mod gateway;
pub mod gemini;
pub mod huggingface;
pub mod openai;

pub use gateway::ApiGateway;

use crate::config::FileProvidersConfig;
use chatgate_application::{CompletionGateway, ConfigurationError};
use std::sync::Arc;

/// Build the gateway for a provider named in `[providers]`.
pub fn build_gateway(
    providers: &FileProvidersConfig,
    name: &str,
) -> Result<Arc<dyn CompletionGateway>, ConfigurationError> {
    let settings = providers.settings(name)?;
    Ok(Arc::new(ApiGateway::new(settings)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_gateway_by_name() {
        let providers = FileProvidersConfig::default();
        assert_eq!(
            build_gateway(&providers, "HuggingFace").unwrap().provider_name(),
            "huggingface"
        );
        assert!(matches!(
            build_gateway(&providers, "anthropic"),
            Err(ConfigurationError::UnknownProvider(_))
        ));
    }
}
