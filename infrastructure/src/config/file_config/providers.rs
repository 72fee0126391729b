//! Provider configuration from TOML (`[providers]` section)

use chatgate_application::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hosted completion APIs chatgate can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Gemini,
    HuggingFace,
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::HuggingFace => "huggingface",
            ProviderKind::OpenAi => "openai",
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::HuggingFace => "HUGGINGFACE_TOKEN",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            ProviderKind::HuggingFace => "https://api-inference.huggingface.co/models",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-1.5-pro",
            ProviderKind::HuggingFace => "HuggingFaceH4/zephyr-7b-beta",
            ProviderKind::OpenAi => "gpt-3.5-turbo",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "huggingface" | "hf" => Ok(ProviderKind::HuggingFace),
            "openai" => Ok(ProviderKind::OpenAi),
            _ => Err(ConfigurationError::UnknownProvider(s.to_string())),
        }
    }
}

/// Raw per-provider overrides. Unset fields fall back to the
/// provider's built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL of the API.
    pub base_url: Option<String>,
    /// Model used when `[generation] model` is not set.
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Chat provider: "gemini", "huggingface" or "openai".
    pub default: String,
    /// Provider used for `/end` summaries (falls back to `default`).
    pub summary: Option<String>,
    pub gemini: FileProviderConfig,
    pub huggingface: FileProviderConfig,
    pub openai: FileProviderConfig,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            default: ProviderKind::Gemini.as_str().to_string(),
            summary: None,
            gemini: FileProviderConfig::default(),
            huggingface: FileProviderConfig::default(),
            openai: FileProviderConfig::default(),
        }
    }
}

/// Fully resolved provider settings, ready to build a gateway from.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl ProviderSettings {
    /// Resolve the API key: the env var wins over the literal `api_key`.
    pub fn resolve_api_key(&self) -> Result<String, ConfigurationError> {
        let from_env = std::env::var(&self.api_key_env)
            .ok()
            .filter(|v| !v.trim().is_empty());
        let from_file = self
            .api_key
            .as_ref()
            .filter(|v| !v.trim().is_empty())
            .cloned();

        match from_env.or(from_file) {
            Some(key) if key.trim().chars().any(char::is_whitespace) => {
                Err(ConfigurationError::InvalidCredentials {
                    provider: self.kind.to_string(),
                    reason: "key contains whitespace".to_string(),
                })
            }
            Some(key) => Ok(key.trim().to_string()),
            None => Err(ConfigurationError::MissingCredentials {
                provider: self.kind.to_string(),
                env_var: self.api_key_env.clone(),
            }),
        }
    }
}

impl FileProvidersConfig {
    /// Resolve settings for a provider by name.
    pub fn settings(&self, provider: &str) -> Result<ProviderSettings, ConfigurationError> {
        let kind: ProviderKind = provider.parse()?;
        let raw = match kind {
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::HuggingFace => &self.huggingface,
            ProviderKind::OpenAi => &self.openai,
        };

        Ok(ProviderSettings {
            kind,
            api_key_env: raw
                .api_key_env
                .clone()
                .unwrap_or_else(|| kind.default_api_key_env().to_string()),
            api_key: raw.api_key.clone(),
            base_url: raw
                .base_url
                .as_deref()
                .unwrap_or(kind.default_base_url())
                .trim_end_matches('/')
                .to_string(),
            model: raw
                .model
                .clone()
                .unwrap_or_else(|| kind.default_model().to_string()),
        })
    }

    /// Summary provider name
    pub fn summary_provider(&self) -> &str {
        self.summary.as_deref().unwrap_or(&self.default)
    }
}
