//! User input rules: emptiness, length, and repeated submissions.

mod duplicate;
mod policy;

pub use duplicate::DuplicateGuard;
pub use policy::InputPolicy;
