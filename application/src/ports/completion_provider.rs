//! Completion Provider port
//!
//! Defines the interface for calling a hosted text-generation model.
//! Adapters normalise whatever the vendor returns into
//! `Result<String, ProviderError>` so response shapes never reach the
//! controller.

use crate::config::ConfigurationError;
use async_trait::async_trait;
use chatgate_domain::GenerationConfig;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a completion call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request rejected by content policy: {0}")]
    ContentPolicyRejected(String),

    #[error("Rate limited by provider")]
    RateLimitedByProvider,

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Provider error: {0}")]
    Unknown(String),
}

impl ProviderError {
    /// Only transient unavailability (HTTP 503 and friends) is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::Unavailable(_))
    }

    /// Message shown to the user in place of the assistant's reply.
    pub fn user_message(&self) -> String {
        match self {
            ProviderError::AuthenticationFailed(_) => {
                "The model provider rejected the API key. Check your credentials and start a new session.".to_string()
            }
            ProviderError::ContentPolicyRejected(_) => {
                "I apologize, but I cannot process that request.".to_string()
            }
            ProviderError::RateLimitedByProvider => {
                "The model provider is receiving too many requests. Please wait a moment and try again.".to_string()
            }
            ProviderError::Unavailable(_) => {
                "The model service is temporarily unavailable. Please try again shortly.".to_string()
            }
            ProviderError::Timeout(after) => format!(
                "The model did not answer within {} seconds. Please try again.",
                after.as_secs()
            ),
            ProviderError::Unknown(_) => {
                "I encountered an error processing your request. Please try again.".to_string()
            }
        }
    }
}

/// A connected client handle for one provider.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short provider name for logs (e.g. `gemini`)
    fn name(&self) -> &str;

    /// Send a fully rendered prompt and return the generated text
    async fn complete(&self, prompt: &str, config: &GenerationConfig)
    -> Result<String, ProviderError>;
}

/// Factory for provider client handles.
///
/// Credentials are checked eagerly so a session can refuse to start;
/// the handle itself is opened lazily on the first admitted turn.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Short provider name for logs (e.g. `gemini`)
    fn provider_name(&self) -> &str;

    /// Check that credentials are present and well-formed. No network I/O.
    fn verify_credentials(&self) -> Result<(), ConfigurationError>;

    /// Open a client handle
    async fn connect(&self) -> Result<Arc<dyn CompletionProvider>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unavailable_is_retryable() {
        assert!(ProviderError::Unavailable("503".to_string()).is_retryable());
        assert!(!ProviderError::AuthenticationFailed("401".to_string()).is_retryable());
        assert!(!ProviderError::ContentPolicyRejected("SAFETY".to_string()).is_retryable());
        assert!(!ProviderError::RateLimitedByProvider.is_retryable());
        assert!(!ProviderError::Timeout(Duration::from_secs(5)).is_retryable());
        assert!(!ProviderError::Unknown("?".to_string()).is_retryable());
    }

    #[test]
    fn test_user_messages_are_distinct() {
        let errors = [
            ProviderError::AuthenticationFailed(String::new()),
            ProviderError::ContentPolicyRejected(String::new()),
            ProviderError::RateLimitedByProvider,
            ProviderError::Unavailable(String::new()),
            ProviderError::Timeout(Duration::from_secs(30)),
            ProviderError::Unknown(String::new()),
        ];
        let messages: std::collections::HashSet<String> =
            errors.iter().map(|e| e.user_message()).collect();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn test_timeout_message_mentions_duration() {
        let msg = ProviderError::Timeout(Duration::from_secs(30)).user_message();
        assert!(msg.contains("30 seconds"));
    }
}
