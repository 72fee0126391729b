//! Domain error types

use std::time::Duration;
use thiserror::Error;

/// Reasons a submitted message is refused before anything else happens.
///
/// Every variant is recoverable: the session state is left untouched and
/// the caller shows the message next to the input field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Message cannot be empty")]
    Empty,

    #[error("Message is too long ({len} characters, limit is {max})")]
    TooLong { len: usize, max: usize },

    #[error("Please wait {remaining:?} before sending the same message again")]
    DuplicateTooSoon { remaining: Duration },
}

impl ValidationError {
    /// Check if this error was caused by a repeated submission
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ValidationError::DuplicateTooSoon { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(ValidationError::Empty.to_string(), "Message cannot be empty");
        assert_eq!(
            ValidationError::TooLong { len: 12, max: 10 }.to_string(),
            "Message is too long (12 characters, limit is 10)"
        );
    }

    #[test]
    fn test_is_duplicate_check() {
        assert!(
            ValidationError::DuplicateTooSoon {
                remaining: Duration::from_secs(1)
            }
            .is_duplicate()
        );
        assert!(!ValidationError::Empty.is_duplicate());
    }
}
