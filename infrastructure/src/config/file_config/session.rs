//! Session tunables from TOML (`[session]`, `[rate_limit]`, `[input]`,
//! `[retry]` and `[generation]` sections)

use chatgate_domain::PromptStyle;
use serde::{Deserialize, Serialize};

/// Raw `[session]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// History cap in turns
    pub max_history_turns: usize,
    /// Per-attempt provider timeout in seconds (0 disables)
    pub request_timeout_secs: u64,
    /// Prompt template, e.g. `{ style = "brief", max_words = 100 }`
    pub prompt: PromptStyle,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            max_history_turns: 50,
            request_timeout_secs: 60,
            prompt: PromptStyle::default(),
        }
    }
}

/// Raw `[rate_limit]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRateLimitConfig {
    pub max_requests: usize,
    pub window_secs: u64,
}

impl Default for FileRateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 60,
            window_secs: 60,
        }
    }
}

/// Raw `[input]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInputConfig {
    /// Maximum message length in characters, after trimming
    pub max_chars: usize,
    /// Minimum gap between two identical messages
    pub duplicate_cooldown_ms: u64,
}

impl Default for FileInputConfig {
    fn default() -> Self {
        Self {
            max_chars: 1000,
            duplicate_cooldown_ms: 2000,
        }
    }
}

/// Raw `[retry]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 1000,
        }
    }
}

/// Raw `[generation]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Overrides the provider's model when set
    pub model: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.7,
            max_output_tokens: 800,
        }
    }
}
