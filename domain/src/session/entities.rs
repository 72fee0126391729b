//! Session domain entities

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One message in a conversation (Entity)
///
/// Immutable once created. The text is expected to be validated by the
/// caller (see [`InputPolicy`](crate::input::InputPolicy)); synthetic
/// assistant turns carrying provider errors are flagged with `is_error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    speaker: Speaker,
    text: String,
    timestamp: Instant,
    is_error: bool,
}

impl Turn {
    pub fn new(speaker: Speaker, text: impl Into<String>, timestamp: Instant) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp,
            is_error: false,
        }
    }

    pub fn user(text: impl Into<String>, timestamp: Instant) -> Self {
        Self::new(Speaker::User, text, timestamp)
    }

    pub fn assistant(text: impl Into<String>, timestamp: Instant) -> Self {
        Self::new(Speaker::Assistant, text, timestamp)
    }

    /// Assistant turn that reports a failed provider call to the user.
    pub fn assistant_error(message: impl Into<String>, timestamp: Instant) -> Self {
        Self {
            is_error: true,
            ..Self::assistant(message, timestamp)
        }
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_constructors() {
        let now = Instant::now();
        let user = Turn::user("hello", now);
        assert_eq!(user.speaker(), Speaker::User);
        assert_eq!(user.text(), "hello");
        assert_eq!(user.timestamp(), now);
        assert!(!user.is_error());

        let failure = Turn::assistant_error("Request timed out", now);
        assert_eq!(failure.speaker(), Speaker::Assistant);
        assert!(failure.is_error());
    }

    #[test]
    fn test_speaker_display() {
        assert_eq!(Speaker::User.to_string(), "user");
        assert_eq!(Speaker::Assistant.to_string(), "assistant");
    }
}
