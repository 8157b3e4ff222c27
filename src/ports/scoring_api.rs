//! Scoring API Port - Interface to the remote credit-scoring service.
//!
//! The dashboard never talks HTTP directly; handlers call this port and
//! adapters translate to and from the wire.
//!
//! # Endpoints
//!
//! - `health` - liveness; failure is fatal to the session
//! - `predict` - probability, decision and ranked attributions
//! - `population` - full population sample for one feature
//! - `population_stats` - aggregate statistics, used opportunistically
//! - `population_pair` - two independent samples for a pair analysis

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::client::{ApiPayload, Feature};
use crate::domain::foundation::ErrorCode;
use crate::domain::population::{PopulationDistribution, PopulationStats};
use crate::domain::prediction::PredictionResult;

/// Longest response body excerpt kept in an [`ApiError::HttpStatus`].
pub const BODY_EXCERPT_CHARS: usize = 100;

/// Port for the remote scoring service.
#[async_trait]
pub trait ScoringApi: Send + Sync {
    /// Checks that the service is reachable and healthy.
    async fn health(&self) -> Result<HealthStatus, ApiError>;

    /// Scores one client given its API-native values.
    async fn predict(&self, payload: &ApiPayload) -> Result<PredictionResult, ApiError>;

    /// Fetches the population sample for one feature.
    async fn population(&self, feature: Feature) -> Result<PopulationDistribution, ApiError>;

    /// Fetches aggregate population statistics.
    async fn population_stats(&self) -> Result<PopulationStats, ApiError>;

    /// Fetches the two samples of a pair analysis.
    ///
    /// The samples are drawn independently; callers zip them by index.
    async fn population_pair(
        &self,
        var1: Feature,
        var2: Feature,
    ) -> Result<(PopulationDistribution, PopulationDistribution), ApiError> {
        let first = self.population(var1).await?;
        let second = self.population(var2).await?;
        Ok((first, second))
    }
}

/// Health endpoint response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// Errors from scoring service calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request exceeded its timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Service could not be reached.
    #[error("connection failure: {0}")]
    ConnectionFailure(String),

    /// Non-2xx response.
    #[error("HTTP {code}: {body_excerpt}")]
    HttpStatus {
        code: u16,
        /// Start of the response body.
        body_excerpt: String,
    },

    /// Response body lacked expected keys or had the wrong shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Request could not be built from local data.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl ApiError {
    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    pub fn connection_failure(message: impl Into<String>) -> Self {
        Self::ConnectionFailure(message.into())
    }

    /// Creates an HTTP status error, keeping the first 100 characters of the body.
    pub fn http_status(code: u16, body: &str) -> Self {
        Self::HttpStatus {
            code,
            body_excerpt: body.chars().take(BODY_EXCERPT_CHARS).collect(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Short message shown next to the action that failed.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Timeout { .. } => "Timeout - the API is too slow, please retry".to_string(),
            ApiError::ConnectionFailure(_) => "Connection error - API unavailable".to_string(),
            ApiError::HttpStatus { code, body_excerpt } => {
                format!("API error {}: {}", code, body_excerpt)
            }
            ApiError::MalformedResponse(msg) => format!("Unexpected API response: {}", msg),
            ApiError::Validation(msg) => msg.clone(),
        }
    }

    /// Returns true if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Timeout { .. } | ApiError::ConnectionFailure(_) => true,
            ApiError::HttpStatus { code, .. } => *code >= 500,
            ApiError::MalformedResponse(_) | ApiError::Validation(_) => false,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Timeout { .. } => ErrorCode::Timeout,
            ApiError::ConnectionFailure(_) => ErrorCode::ConnectionFailure,
            ApiError::HttpStatus { .. } => ErrorCode::HttpStatus,
            ApiError::MalformedResponse(_) => ErrorCode::MalformedResponse,
            ApiError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_truncates_body_to_excerpt() {
        let body = "x".repeat(250);
        match ApiError::http_status(500, &body) {
            ApiError::HttpStatus { code, body_excerpt } => {
                assert_eq!(code, 500);
                assert_eq!(body_excerpt.chars().count(), BODY_EXCERPT_CHARS);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn http_status_truncates_on_char_boundaries() {
        let body = "é".repeat(150);
        let err = ApiError::http_status(422, &body);
        assert!(matches!(err, ApiError::HttpStatus { ref body_excerpt, .. } if body_excerpt.chars().count() == 100));
    }

    #[test]
    fn user_messages_are_short_and_specific() {
        assert_eq!(
            ApiError::timeout(30).user_message(),
            "Timeout - the API is too slow, please retry"
        );
        assert_eq!(
            ApiError::http_status(404, "not found").user_message(),
            "API error 404: not found"
        );
    }

    #[test]
    fn retryable_errors() {
        assert!(ApiError::timeout(10).is_retryable());
        assert!(ApiError::connection_failure("refused").is_retryable());
        assert!(ApiError::http_status(503, "").is_retryable());
        assert!(!ApiError::http_status(400, "").is_retryable());
        assert!(!ApiError::malformed("missing prediction").is_retryable());
    }

    #[test]
    fn error_display() {
        assert_eq!(ApiError::timeout(15).to_string(), "request timed out after 15s");
        assert_eq!(
            ApiError::malformed("missing key 'values'").to_string(),
            "malformed response: missing key 'values'"
        );
    }
}
