//! Turn controller: the conversational state machine.
//!
//! Orchestrates one turn: validate input → check admission → append the
//! user turn → call the provider → append the reply (or a synthetic error
//! turn) → back to idle.
//!
//! ```text
//!            submit (valid, admitted)
//!   Idle ─────────────────────────────▶ AwaitingResponse
//!    ▲                                        │
//!    └──────── reply or failure turn ◀────────┘
//! ```
//!
//! Submissions while a reply is pending are refused with
//! [`SubmitError::Busy`]; they are never queued. The session lock is never
//! held across the provider call, so the controller can be shared behind an
//! `Arc` by a UI layer that redraws from [`TurnController::history`].

use crate::config::{ConfigurationError, RetryPolicy, SessionConfig};
use crate::ports::completion_provider::{CompletionGateway, CompletionProvider, ProviderError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::session::{Session, TurnState};
use crate::use_cases::retry::complete_with_retry;
use chatgate_domain::util::preview;
use chatgate_domain::{GenerationConfig, PromptTemplate, Turn, ValidationError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Reasons a submission was refused without calling the provider.
///
/// None of these mutate the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Too many messages, please slow down")]
    AdmissionRejected { retry_after: Option<Duration> },

    #[error("Still processing your previous message, please wait")]
    Busy,

    #[error("The session was reset before the reply arrived")]
    SessionReset,
}

/// Result of an admitted turn.
///
/// Provider failures are not errors at this level: they become an
/// assistant turn carrying a user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Replied(String),
    Failed {
        message: String,
        error: ProviderError,
    },
}

impl TurnOutcome {
    /// Text of the assistant turn that was appended
    pub fn text(&self) -> &str {
        match self {
            TurnOutcome::Replied(text) => text,
            TurnOutcome::Failed { message, .. } => message,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TurnOutcome::Failed { .. })
    }
}

/// Everything needed to finish a turn once the session lock is released.
struct PendingTurn {
    prompt: String,
    epoch: u64,
    client: Option<Arc<dyn CompletionProvider>>,
    generation: GenerationConfig,
    retry: RetryPolicy,
    timeout: Option<Duration>,
}

/// Returns the session to `Idle` if a submit future is dropped mid-call.
struct InFlight<'a> {
    session: &'a Mutex<Session>,
    epoch: u64,
    finished: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut session = lock(self.session);
        if session.epoch == self.epoch && session.state == TurnState::AwaitingResponse {
            warn!("Turn abandoned while awaiting the provider; returning to idle");
            session.state = TurnState::Idle;
        }
    }
}

fn lock(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Controller for one conversational session.
pub struct TurnController {
    session: Mutex<Session>,
    gateway: Arc<dyn CompletionGateway>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl TurnController {
    /// Bind a session to a provider gateway.
    ///
    /// Fails with [`ConfigurationError`] when the gateway has no usable
    /// credentials; no controller exists in that case.
    pub fn new(
        session: Session,
        gateway: Arc<dyn CompletionGateway>,
    ) -> Result<Self, ConfigurationError> {
        gateway.verify_credentials()?;
        info!(
            "Session ready (provider {}, model {})",
            gateway.provider_name(),
            session.config().generation.model
        );
        Ok(Self {
            session: Mutex::new(session),
            gateway,
            conversation_logger: Arc::new(NoConversationLogger),
        })
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        let (model, max_turns) = {
            let session = lock(&self.session);
            (
                session.config().generation.model.to_string(),
                session.config().max_history_turns,
            )
        };
        self.conversation_logger.log(ConversationEvent::new(
            "session_started",
            serde_json::json!({
                "provider": self.gateway.provider_name(),
                "model": model,
                "max_history_turns": max_turns,
            }),
        ));
        self
    }

    /// Submit raw user input and wait for the assistant's turn.
    pub async fn submit(&self, raw: &str) -> Result<TurnOutcome, SubmitError> {
        let pending = self.begin_turn(raw, Instant::now().into_std())?;
        let mut in_flight = InFlight {
            session: &self.session,
            epoch: pending.epoch,
            finished: false,
        };

        let (client, connected) = match pending.client {
            Some(client) => (client, false),
            None => match self.gateway.connect().await {
                Ok(client) => {
                    info!("Connected to {}", self.gateway.provider_name());
                    (client, true)
                }
                Err(e) => {
                    warn!("Could not connect to {}: {}", self.gateway.provider_name(), e);
                    in_flight.finished = true;
                    return self.finish_turn(pending.epoch, Err(e), None);
                }
            },
        };

        let result = complete_with_retry(
            client.as_ref(),
            &pending.prompt,
            &pending.generation,
            &pending.retry,
            pending.timeout,
        )
        .await
        .and_then(|text| {
            if text.trim().is_empty() {
                Err(ProviderError::Unknown("empty response".to_string()))
            } else {
                Ok(text)
            }
        });

        in_flight.finished = true;
        self.finish_turn(pending.epoch, result, connected.then_some(client))
    }

    /// Synchronous half of a submission: every check and the user turn.
    fn begin_turn(&self, raw: &str, now: std::time::Instant) -> Result<PendingTurn, SubmitError> {
        let mut session = lock(&self.session);

        if session.state == TurnState::AwaitingResponse {
            debug!("Rejecting submission: previous turn still pending");
            return Err(SubmitError::Busy);
        }

        let text = session.config().input.validate(raw)?;
        let cooldown = session.config().input.duplicate_cooldown;
        session.duplicates.check(text, now, cooldown)?;

        if !session.limiter.can_admit(now) {
            let retry_after = session.limiter.retry_after(now);
            warn!(
                "Admission rejected: {} calls in the last {:?}",
                session.limiter.in_window(),
                session.limiter.window()
            );
            self.conversation_logger.log(ConversationEvent::new(
                "admission_rejected",
                serde_json::json!({
                    "in_window": session.limiter.in_window(),
                    "retry_after_ms": retry_after.map(|d| d.as_millis() as u64),
                }),
            ));
            return Err(SubmitError::AdmissionRejected { retry_after });
        }

        session.duplicates.record(text, now);
        let prompt = PromptTemplate::render(
            session.config().prompt_style,
            &session.history.as_sequence(),
            text,
        );
        session.history.append(Turn::user(text, now));
        session.state = TurnState::AwaitingResponse;

        info!("User turn accepted: {}", preview(text, 80));
        self.conversation_logger.log(ConversationEvent::new(
            "user_turn",
            serde_json::json!({
                "chars": text.chars().count(),
                "text": text,
            }),
        ));

        Ok(PendingTurn {
            prompt,
            epoch: session.epoch,
            client: session.client.clone(),
            generation: session.config().generation.clone(),
            retry: session.config().retry.clone(),
            timeout: session.config().request_timeout,
        })
    }

    /// Record the provider's answer (or failure) and return to idle.
    fn finish_turn(
        &self,
        epoch: u64,
        result: Result<String, ProviderError>,
        new_client: Option<Arc<dyn CompletionProvider>>,
    ) -> Result<TurnOutcome, SubmitError> {
        let mut session = lock(&self.session);

        if session.epoch != epoch {
            info!("Discarding reply for a session that was reset");
            return Err(SubmitError::SessionReset);
        }

        if session.client.is_none() {
            session.client = new_client;
        }

        let now = Instant::now().into_std();
        let outcome = match result {
            Ok(text) => {
                debug!("Assistant reply: {}", preview(&text, 80));
                self.conversation_logger.log(ConversationEvent::new(
                    "assistant_turn",
                    serde_json::json!({
                        "model": session.config().generation.model.to_string(),
                        "bytes": text.len(),
                        "text": text,
                    }),
                ));
                session.history.append(Turn::assistant(text.clone(), now));
                TurnOutcome::Replied(text)
            }
            Err(error) => {
                warn!("Provider call failed: {}", error);
                if matches!(error, ProviderError::AuthenticationFailed(_)) {
                    // Force a fresh handle on the next turn
                    session.client = None;
                }
                let message = error.user_message();
                self.conversation_logger.log(ConversationEvent::new(
                    "provider_error",
                    serde_json::json!({
                        "error": error.to_string(),
                        "message": message,
                    }),
                ));
                session
                    .history
                    .append(Turn::assistant_error(message.clone(), now));
                TurnOutcome::Failed { message, error }
            }
        };

        session.state = TurnState::Idle;
        Ok(outcome)
    }

    /// Clear the conversation and drop the provider handle.
    pub fn reset(&self) {
        let mut session = lock(&self.session);
        let dropped_turns = session.history.len();
        session.reset();
        info!("Session reset ({} turns cleared)", dropped_turns);
        self.conversation_logger.log(ConversationEvent::new(
            "session_reset",
            serde_json::json!({ "turns_cleared": dropped_turns }),
        ));
    }

    /// Snapshot of the conversation, oldest turn first.
    pub fn history(&self) -> Vec<Turn> {
        lock(&self.session).turns()
    }

    pub fn state(&self) -> TurnState {
        lock(&self.session).state()
    }

    pub fn is_connected(&self) -> bool {
        lock(&self.session).is_connected()
    }

    pub fn config(&self) -> SessionConfig {
        lock(&self.session).config().clone()
    }

    pub fn provider_name(&self) -> &str {
        self.gateway.provider_name()
    }
}
