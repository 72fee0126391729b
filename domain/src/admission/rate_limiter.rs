//! Sliding-window rate limiter

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

/// Admits at most `max_admitted` calls in any trailing `window`.
///
/// Keeps the instants of admitted calls in a FIFO queue. The window
/// boundary is exclusive: an entry admitted exactly `window` ago no longer
/// counts against the limit.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    window: Duration,
    max_admitted: NonZeroUsize,
    admitted: VecDeque<Instant>,
}

impl RateLimiter {
    pub fn new(max_admitted: NonZeroUsize, window: Duration) -> Self {
        Self {
            window,
            max_admitted,
            admitted: VecDeque::new(),
        }
    }

    /// Prune expired entries, then admit (and record `now`) if under the limit.
    ///
    /// `now` must not go backwards between calls.
    pub fn can_admit(&mut self, now: Instant) -> bool {
        self.prune(now);
        if self.admitted.len() < self.max_admitted.get() {
            self.admitted.push_back(now);
            true
        } else {
            false
        }
    }

    /// Time until the oldest admitted entry leaves the window.
    ///
    /// Returns `None` when a call at `now` would be admitted. Does not mutate.
    pub fn retry_after(&self, now: Instant) -> Option<Duration> {
        let live = self
            .admitted
            .iter()
            .filter(|t| !self.is_expired(**t, now))
            .count();
        if live < self.max_admitted.get() {
            return None;
        }
        self.admitted
            .iter()
            .find(|t| !self.is_expired(**t, now))
            .map(|oldest| self.window - now.saturating_duration_since(*oldest))
    }

    /// Number of admissions still inside the window as of the last call.
    pub fn in_window(&self) -> usize {
        self.admitted.len()
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_admitted(&self) -> usize {
        self.max_admitted.get()
    }

    pub fn reset(&mut self) {
        self.admitted.clear();
    }

    fn prune(&mut self, now: Instant) {
        while let Some(&oldest) = self.admitted.front() {
            if self.is_expired(oldest, now) {
                self.admitted.pop_front();
            } else {
                break;
            }
        }
    }

    fn is_expired(&self, admitted_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(admitted_at) >= self.window
    }
}
