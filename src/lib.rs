//! Credit Dashboard - client-side orchestration for a credit-scoring API
//!
//! This crate drives an analyst session against a remote scoring API:
//! submitting a client record, interpreting the decision against the
//! threshold, explaining the score feature by feature and placing the
//! client within population samples, with TTL caching of the API reads.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
