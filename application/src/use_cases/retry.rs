//! Provider call with per-attempt timeout and bounded retry.

use crate::config::RetryPolicy;
use crate::ports::completion_provider::{CompletionProvider, ProviderError};
use chatgate_domain::GenerationConfig;
use std::time::Duration;
use tracing::{debug, warn};

/// Call the provider, retrying only [`ProviderError::Unavailable`].
///
/// Each attempt is bounded by `timeout` when set; a timeout is final.
pub async fn complete_with_retry(
    provider: &dyn CompletionProvider,
    prompt: &str,
    config: &GenerationConfig,
    policy: &RetryPolicy,
    timeout: Option<Duration>,
) -> Result<String, ProviderError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        debug!(
            "{} request attempt {}/{} (model {})",
            provider.name(),
            attempt,
            max_attempts,
            config.model
        );

        let result = match timeout {
            Some(limit) => tokio::time::timeout(limit, provider.complete(prompt, config))
                .await
                .unwrap_or(Err(ProviderError::Timeout(limit))),
            None => provider.complete(prompt, config).await,
        };

        match result {
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                warn!(
                    "{} attempt {}/{} failed: {}; retrying in {:?}",
                    provider.name(),
                    attempt,
                    max_attempts,
                    e,
                    policy.delay
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}
