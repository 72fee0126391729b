//! Session parameters: every tunable of the conversational loop.

use super::error::ConfigurationError;
use chatgate_domain::{GenerationConfig, InputPolicy, PromptStyle};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;

/// Sliding-window admission limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitParams {
    /// Maximum admitted calls per window (`R`)
    pub max_requests: usize,
    /// Trailing window length (`W`)
    pub window: Duration,
}

impl Default for RateLimitParams {
    fn default() -> Self {
        Self {
            max_requests: 60,
            window: Duration::from_secs(60),
        }
    }
}

/// Bounded fixed-delay retry for transient provider failures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

/// Session configuration.
///
/// | Field | Default |
/// |-------|---------|
/// | `max_history_turns` | 50 |
/// | `rate_limit` | 60 calls / 60 s |
/// | `input.max_chars` | 1000 |
/// | `input.duplicate_cooldown` | 2 s |
/// | `retry` | 3 attempts, 1 s apart |
/// | `request_timeout` | 60 s |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// History cap (`N`)
    pub max_history_turns: usize,
    pub rate_limit: RateLimitParams,
    pub input: InputPolicy,
    pub retry: RetryPolicy,
    /// Per-attempt timeout on the provider call; `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    pub generation: GenerationConfig,
    pub prompt_style: PromptStyle,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_history_turns: 50,
            rate_limit: RateLimitParams::default(),
            input: InputPolicy::default(),
            retry: RetryPolicy::default(),
            request_timeout: Some(Duration::from_secs(60)),
            generation: GenerationConfig::default(),
            prompt_style: PromptStyle::default(),
        }
    }
}

impl SessionConfig {
    // ==================== Builder Methods ====================

    pub fn with_max_history_turns(mut self, max: usize) -> Self {
        self.max_history_turns = max;
        self
    }

    pub fn with_rate_limit(mut self, max_requests: usize, window: Duration) -> Self {
        self.rate_limit = RateLimitParams {
            max_requests,
            window,
        };
        self
    }

    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.input.max_chars = max;
        self
    }

    pub fn with_duplicate_cooldown(mut self, cooldown: Duration) -> Self {
        self.input.duplicate_cooldown = cooldown;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_prompt_style(mut self, style: PromptStyle) -> Self {
        self.prompt_style = style;
        self
    }

    // ==================== Validation ====================

    /// Reject settings that would make the session unusable.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.max_history_turns == 0 {
            return Err(ConfigurationError::invalid(
                "max_history_turns",
                "must be at least 1",
            ));
        }
        if self.rate_limit.max_requests == 0 {
            return Err(ConfigurationError::invalid(
                "rate_limit.max_requests",
                "must be at least 1",
            ));
        }
        if self.rate_limit.window.is_zero() {
            return Err(ConfigurationError::invalid(
                "rate_limit.window",
                "must be longer than zero",
            ));
        }
        if self.input.max_chars == 0 {
            return Err(ConfigurationError::invalid(
                "input.max_chars",
                "must be at least 1",
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigurationError::invalid(
                "retry.max_attempts",
                "must be at least 1",
            ));
        }
        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigurationError::invalid(
                "request_timeout",
                "must be longer than zero when set",
            ));
        }
        if self.generation.model.is_blank() {
            return Err(ConfigurationError::invalid(
                "generation.model",
                "must not be empty",
            ));
        }
        if let PromptStyle::Brief { max_words: 0 } = self.prompt_style {
            return Err(ConfigurationError::invalid(
                "prompt_style.max_words",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// History cap as a non-zero count. Call after [`validate`](Self::validate).
    pub(crate) fn history_cap(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.max_history_turns).unwrap_or(NonZeroUsize::MIN)
    }

    /// Admission limit as a non-zero count. Call after [`validate`](Self::validate).
    pub(crate) fn admission_cap(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.rate_limit.max_requests).unwrap_or(NonZeroUsize::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = SessionConfig::default();
        assert_eq!(config.max_history_turns, 50);
        assert_eq!(config.rate_limit.max_requests, 60);
        assert_eq!(config.rate_limit.window, Duration::from_secs(60));
        assert_eq!(config.input.max_chars, 1000);
        assert_eq!(config.input.duplicate_cooldown, Duration::from_secs(2));
        assert_eq!(config.retry.max_attempts, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::default()
            .with_max_history_turns(3)
            .with_rate_limit(2, Duration::from_secs(10))
            .with_max_input_chars(20)
            .with_retry(RetryPolicy::none())
            .with_request_timeout(None);

        assert_eq!(config.max_history_turns, 3);
        assert_eq!(config.rate_limit.max_requests, 2);
        assert_eq!(config.input.max_chars, 20);
        assert_eq!(config.retry.max_attempts, 1);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let cases = [
            (SessionConfig::default().with_max_history_turns(0), "max_history_turns"),
            (
                SessionConfig::default().with_rate_limit(0, Duration::from_secs(1)),
                "rate_limit.max_requests",
            ),
            (
                SessionConfig::default().with_rate_limit(1, Duration::ZERO),
                "rate_limit.window",
            ),
            (SessionConfig::default().with_max_input_chars(0), "input.max_chars"),
            (
                SessionConfig::default().with_retry(RetryPolicy {
                    max_attempts: 0,
                    delay: Duration::ZERO,
                }),
                "retry.max_attempts",
            ),
            (
                SessionConfig::default().with_request_timeout(Some(Duration::ZERO)),
                "request_timeout",
            ),
        ];

        for (config, field) in cases {
            match config.validate() {
                Err(ConfigurationError::InvalidSetting { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected InvalidSetting for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_validate_rejects_blank_model() {
        let config = SessionConfig::default()
            .with_generation(GenerationConfig::default().with_model("   "));
        assert!(config.validate().is_err());
    }
}
