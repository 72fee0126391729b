//! Repeated-submission detection

use crate::core::error::ValidationError;
use std::time::{Duration, Instant};

/// Remembers the last accepted message so an identical resubmission inside
/// the cooldown can be refused.
#[derive(Debug, Clone, Default)]
pub struct DuplicateGuard {
    last: Option<(String, Instant)>,
}

impl DuplicateGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(
        &self,
        text: &str,
        now: Instant,
        cooldown: Duration,
    ) -> Result<(), ValidationError> {
        match &self.last {
            Some((last_text, accepted_at)) if last_text == text => {
                let elapsed = now.saturating_duration_since(*accepted_at);
                if elapsed < cooldown {
                    Err(ValidationError::DuplicateTooSoon {
                        remaining: cooldown - elapsed,
                    })
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }

    /// Record an accepted message.
    pub fn record(&mut self, text: &str, now: Instant) {
        self.last = Some((text.to_string(), now));
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_secs(2);

    #[test]
    fn test_identical_message_inside_cooldown_is_rejected() {
        let now = Instant::now();
        let mut guard = DuplicateGuard::new();
        guard.record("hello", now);

        let err = guard
            .check("hello", now + Duration::from_millis(500), COOLDOWN)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateTooSoon {
                remaining: Duration::from_millis(1500)
            }
        );
    }

    #[test]
    fn test_identical_message_after_cooldown_is_allowed() {
        let now = Instant::now();
        let mut guard = DuplicateGuard::new();
        guard.record("hello", now);
        assert!(guard.check("hello", now + COOLDOWN, COOLDOWN).is_ok());
    }

    #[test]
    fn test_different_message_is_allowed() {
        let now = Instant::now();
        let mut guard = DuplicateGuard::new();
        guard.record("hello", now);
        assert!(guard.check("hello again", now, COOLDOWN).is_ok());
    }

    #[test]
    fn test_clear_forgets_last_message() {
        let now = Instant::now();
        let mut guard = DuplicateGuard::new();
        guard.record("hello", now);
        guard.clear();
        assert!(guard.check("hello", now, COOLDOWN).is_ok());
    }
}
