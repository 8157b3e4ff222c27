//! Ports - interfaces to external collaborators.
//!
//! - `ScoringApi` - the remote credit-scoring service

mod scoring_api;

pub use scoring_api::{ApiError, HealthStatus, ScoringApi, BODY_EXCERPT_CHARS};
