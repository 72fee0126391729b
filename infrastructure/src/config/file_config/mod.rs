//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! with [`FileConfig::to_session_config`].

mod logging;
mod providers;
mod repl;
mod session;

pub use logging::FileLoggingConfig;
pub use providers::{FileProviderConfig, FileProvidersConfig, ProviderKind, ProviderSettings};
pub use repl::FileReplConfig;
pub use session::{
    FileGenerationConfig, FileInputConfig, FileRateLimitConfig, FileRetryConfig,
    FileSessionConfig,
};

use chatgate_application::{ConfigurationError, RetryPolicy, SessionConfig};
use chatgate_domain::{GenerationConfig, ModelId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub session: FileSessionConfig,
    pub rate_limit: FileRateLimitConfig,
    pub input: FileInputConfig,
    pub retry: FileRetryConfig,
    pub generation: FileGenerationConfig,
    pub providers: FileProvidersConfig,
    pub logging: FileLoggingConfig,
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Generation settings for `provider`. `[generation] model` wins over
    /// the provider's own model.
    pub fn generation_for(&self, provider: &str) -> Result<GenerationConfig, ConfigurationError> {
        let model = match self.generation.model.as_deref().map(str::trim) {
            Some(model) if !model.is_empty() => model.to_string(),
            _ => self.providers.settings(provider)?.model,
        };

        Ok(GenerationConfig::default()
            .with_model(ModelId::new(model))
            .with_temperature(self.generation.temperature)
            .with_max_output_tokens(self.generation.max_output_tokens))
    }

    /// Build the session configuration for the chat provider.
    pub fn to_session_config(&self) -> Result<SessionConfig, ConfigurationError> {
        let timeout = match self.session.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let config = SessionConfig::default()
            .with_max_history_turns(self.session.max_history_turns)
            .with_rate_limit(
                self.rate_limit.max_requests,
                Duration::from_secs(self.rate_limit.window_secs),
            )
            .with_max_input_chars(self.input.max_chars)
            .with_duplicate_cooldown(Duration::from_millis(self.input.duplicate_cooldown_ms))
            .with_retry(self.retry_policy())
            .with_request_timeout(timeout)
            .with_generation(self.generation_for(&self.providers.default)?)
            .with_prompt_style(self.session.prompt);

        config.validate()?;
        Ok(config)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.max_attempts,
            delay: Duration::from_millis(self.retry.delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatgate_domain::PromptStyle;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[session]
max_history_turns = 20
request_timeout_secs = 0

[rate_limit]
max_requests = 5
window_secs = 30

[input]
max_chars = 500
duplicate_cooldown_ms = 1500

[retry]
max_attempts = 2
delay_ms = 250

[generation]
temperature = 0.2
max_output_tokens = 256

[providers]
default = "huggingface"
summary = "openai"

[providers.huggingface]
model = "mistralai/Mistral-7B-Instruct-v0.2"

[logging]
conversation_log = "chat.jsonl"

[repl]
show_progress = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let session = config.to_session_config().unwrap();

        assert_eq!(session.max_history_turns, 20);
        assert_eq!(session.request_timeout, None);
        assert_eq!(session.rate_limit.max_requests, 5);
        assert_eq!(session.rate_limit.window, Duration::from_secs(30));
        assert_eq!(session.input.max_chars, 500);
        assert_eq!(session.input.duplicate_cooldown, Duration::from_millis(1500));
        assert_eq!(session.retry.max_attempts, 2);
        assert_eq!(session.retry.delay, Duration::from_millis(250));
        assert_eq!(session.generation.temperature, 0.2);
        assert_eq!(session.generation.max_output_tokens, 256);
        assert_eq!(
            session.generation.model.as_str(),
            "mistralai/Mistral-7B-Instruct-v0.2"
        );
        assert_eq!(config.providers.summary_provider(), "openai");
        assert_eq!(config.logging.conversation_log.as_deref(), Some("chat.jsonl"));
        assert!(!config.repl.show_progress);
    }

    #[test]
    fn test_default_config_matches_session_defaults() {
        let session = FileConfig::default().to_session_config().unwrap();
        assert_eq!(session, SessionConfig::default());
    }

    #[test]
    fn test_generation_model_overrides_provider_model() {
        let config: FileConfig = toml::from_str(
            r#"
[generation]
model = "gemini-1.5-flash"
"#,
        )
        .unwrap();

        let generation = config.generation_for("openai").unwrap();
        assert_eq!(generation.model.as_str(), "gemini-1.5-flash");
    }

    #[test]
    fn test_summary_generation_uses_summary_provider_model() {
        let mut config = FileConfig::default();
        config.providers.summary = Some("openai".to_string());

        let generation = config
            .generation_for(config.providers.summary_provider())
            .unwrap();
        assert_eq!(generation.model.as_str(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_invalid_values_are_configuration_errors() {
        let mut config = FileConfig::default();
        config.rate_limit.window_secs = 0;
        assert!(matches!(
            config.to_session_config(),
            Err(ConfigurationError::InvalidSetting { .. })
        ));

        let mut config = FileConfig::default();
        config.providers.default = "bard".to_string();
        assert_eq!(
            config.to_session_config(),
            Err(ConfigurationError::UnknownProvider("bard".to_string()))
        );
    }

    #[test]
    fn test_prompt_style_carried_over() {
        let mut config = FileConfig::default();
        config.session.prompt = PromptStyle::Brief { max_words: 50 };
        assert_eq!(
            config.to_session_config().unwrap().prompt_style,
            PromptStyle::Brief { max_words: 50 }
        );
    }
}
