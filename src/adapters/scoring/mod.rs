//! Scoring adapters - implementations of the ScoringApi port.

mod http_client;
mod mock_client;

pub use http_client::{HttpScoringClient, ScoringClientConfig};
pub use mock_client::{MockCall, MockScoringApi};
