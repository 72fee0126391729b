//! Application-level configuration.
//!
//! - [`SessionConfig`]: history cap, admission limits, input rules, retry and timeout
//! - [`ConfigurationError`]: settings or credentials that prevent a session from starting

pub mod error;
pub mod session_config;

pub use error::ConfigurationError;
pub use session_config::{RateLimitParams, RetryPolicy, SessionConfig};
