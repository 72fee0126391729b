//! Conversational session state.
//!
//! A [`Session`] owns everything one conversation needs: the bounded
//! history, the admission limiter, the duplicate guard and the lazily
//! opened provider handle. It is never shared between conversations.

use crate::config::{ConfigurationError, SessionConfig};
use crate::ports::completion_provider::CompletionProvider;
use chatgate_domain::{DuplicateGuard, RateLimiter, SessionHistory, Turn};
use std::sync::Arc;

/// Where the turn state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingResponse,
}

pub struct Session {
    config: SessionConfig,
    pub(crate) history: SessionHistory,
    pub(crate) limiter: RateLimiter,
    pub(crate) duplicates: DuplicateGuard,
    pub(crate) client: Option<Arc<dyn CompletionProvider>>,
    pub(crate) state: TurnState,
    /// Bumped on every reset so replies for an abandoned turn are dropped.
    pub(crate) epoch: u64,
}

impl Session {
    /// Create an idle, empty session. Fails without side effects on an
    /// invalid configuration.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            history: SessionHistory::new(config.history_cap()),
            limiter: RateLimiter::new(config.admission_cap(), config.rate_limit.window),
            duplicates: DuplicateGuard::new(),
            client: None,
            state: TurnState::Idle,
            epoch: 0,
            config,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn turns(&self) -> Vec<Turn> {
        self.history.as_sequence()
    }

    /// Whether a provider client handle is currently open
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Clear all state and drop the client handle ("new session").
    pub fn reset(&mut self) {
        self.history.clear();
        self.limiter.reset();
        self.duplicates.clear();
        self.client = None;
        self.state = TurnState::Idle;
        self.epoch = self.epoch.wrapping_add(1);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("turns", &self.history.len())
            .field("in_window", &self.limiter.in_window())
            .field("connected", &self.client.is_some())
            .field("epoch", &self.epoch)
            .finish()
    }
}
