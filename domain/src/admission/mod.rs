//! Admission control for outbound provider calls.

mod rate_limiter;

pub use rate_limiter::RateLimiter;
