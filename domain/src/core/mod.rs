//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelId`]: identifier of a hosted model
//! - [`model::GenerationConfig`]: sampling parameters for one call
//! - [`error::ValidationError`]: input refused before admission

pub mod error;
pub mod model;
