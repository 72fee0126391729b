//! Summarize Conversation use case.
//!
//! Ends a chat by asking a (possibly different) provider for a short
//! summary and a sentiment analysis of the transcript.

use crate::config::RetryPolicy;
use crate::ports::completion_provider::{CompletionGateway, ProviderError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::use_cases::retry::complete_with_retry;
use chatgate_domain::{GenerationConfig, PromptTemplate, Turn};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while summarizing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummarizeError {
    #[error("You haven't had any conversation yet")]
    EmptyConversation,

    #[error("Error generating summary: {0}")]
    Provider(#[from] ProviderError),
}

/// Use case for summarizing a finished conversation.
pub struct SummarizeConversationUseCase {
    gateway: Arc<dyn CompletionGateway>,
    generation: GenerationConfig,
    retry: RetryPolicy,
    timeout: Option<Duration>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl SummarizeConversationUseCase {
    /// Summaries are generated deterministically (temperature 0).
    pub fn new(gateway: Arc<dyn CompletionGateway>, generation: GenerationConfig) -> Self {
        Self {
            gateway,
            generation: generation.with_temperature(0.0),
            retry: RetryPolicy::default(),
            timeout: Some(Duration::from_secs(60)),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Summarize `turns`. Error turns are left out of the transcript.
    pub async fn execute(&self, turns: &[Turn]) -> Result<String, SummarizeError> {
        if turns.iter().all(|t| t.is_error()) {
            return Err(SummarizeError::EmptyConversation);
        }

        info!(
            "Summarizing {} turns with {}",
            turns.len(),
            self.gateway.provider_name()
        );

        let provider = self.gateway.connect().await?;
        let prompt = PromptTemplate::summary(turns);
        let summary = complete_with_retry(
            provider.as_ref(),
            &prompt,
            &self.generation,
            &self.retry,
            self.timeout,
        )
        .await?;

        self.conversation_logger.log(ConversationEvent::new(
            "summary",
            serde_json::json!({
                "provider": self.gateway.provider_name(),
                "turns": turns.len(),
                "text": summary,
            }),
        ));

        Ok(summary)
    }
}
