//! Adapters - implementations of the ports.
//!
//! - `scoring` - HTTP and mock clients for the scoring service

pub mod scoring;

pub use scoring::{HttpScoringClient, MockCall, MockScoringApi, ScoringClientConfig};
