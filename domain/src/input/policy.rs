//! Input validation policy

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Limits applied to raw user input before it may become a [`Turn`](crate::Turn).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputPolicy {
    /// Maximum message length, counted in characters (not bytes).
    pub max_chars: usize,
    /// Minimum gap between two accepted identical messages.
    pub duplicate_cooldown: Duration,
}

impl Default for InputPolicy {
    fn default() -> Self {
        Self {
            max_chars: 1000,
            duplicate_cooldown: Duration::from_secs(2),
        }
    }
}

impl InputPolicy {
    pub fn with_max_chars(mut self, max: usize) -> Self {
        self.max_chars = max;
        self
    }

    pub fn with_duplicate_cooldown(mut self, cooldown: Duration) -> Self {
        self.duplicate_cooldown = cooldown;
        self
    }

    /// Check emptiness and length. Returns the input with surrounding
    /// whitespace removed.
    pub fn validate<'a>(&self, raw: &'a str) -> Result<&'a str, ValidationError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(ValidationError::Empty);
        }
        let len = text.chars().count();
        if len > self.max_chars {
            return Err(ValidationError::TooLong {
                len,
                max: self.max_chars,
            });
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_whitespace() {
        let policy = InputPolicy::default();
        assert_eq!(policy.validate(""), Err(ValidationError::Empty));
        assert_eq!(policy.validate("  \n\t "), Err(ValidationError::Empty));
    }

    #[test]
    fn test_rejects_oversized() {
        let policy = InputPolicy::default().with_max_chars(5);
        assert_eq!(
            policy.validate("abcdef"),
            Err(ValidationError::TooLong { len: 6, max: 5 })
        );
        assert_eq!(policy.validate("abcde"), Ok("abcde"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let policy = InputPolicy::default().with_max_chars(3);
        // 9 bytes, 3 characters
        assert_eq!(policy.validate("あのね"), Ok("あのね"));
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let policy = InputPolicy::default();
        assert_eq!(policy.validate("  hello  "), Ok("hello"));
    }
}
