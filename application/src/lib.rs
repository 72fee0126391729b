//! Application layer for chatgate
//!
//! This crate contains the turn controller, the session it drives, port
//! definitions and session configuration. It depends only on the domain
//! layer.

pub mod config;
pub mod ports;
pub mod session;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConfigurationError, RateLimitParams, RetryPolicy, SessionConfig};
pub use ports::{
    completion_provider::{CompletionGateway, CompletionProvider, ProviderError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
};
pub use session::{Session, TurnState};
pub use use_cases::retry::complete_with_retry;
pub use use_cases::summarize_conversation::{SummarizeConversationUseCase, SummarizeError};
pub use use_cases::turn_controller::{SubmitError, TurnController, TurnOutcome};
