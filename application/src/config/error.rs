//! Configuration errors: fatal to session creation.

use thiserror::Error;

/// A session cannot be created with this configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("No API key for {provider}: set {env_var} or providers.{provider}.api_key")]
    MissingCredentials { provider: String, env_var: String },

    #[error("Invalid API key for {provider}: {reason}")]
    InvalidCredentials { provider: String, reason: String },

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Invalid setting {field}: {reason}")]
    InvalidSetting { field: String, reason: String },
}

impl ConfigurationError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidSetting {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
