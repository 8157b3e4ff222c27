//! Domain layer containing the dashboard's business logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (timestamps, IDs, errors, state machines)
//! - `client` - Applicant record, feature catalogue and API codec
//! - `prediction` - Scoring results and feature explanations
//! - `population` - Population samples and client positioning
//! - `cache` - TTL cache store and pair-analysis keys
//! - `session` - Analyst session state machine

pub mod cache;
pub mod client;
pub mod foundation;
pub mod population;
pub mod prediction;
pub mod session;
