//! HTTP Scoring Client - Implementation of ScoringApi over reqwest.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ScoringClientConfig::new("https://scoring.example.com")
//!     .with_prediction_timeout(Duration::from_secs(30));
//!
//! let client = HttpScoringClient::new(config)?;
//! ```
//!
//! Each endpoint has its own timeout. Transport failures, non-2xx statuses
//! and unexpected bodies all surface as [`ApiError`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::domain::client::{ApiPayload, Feature, FeatureValue};
use crate::domain::population::{PopulationDistribution, PopulationStats};
use crate::domain::prediction::{
    Decision, FeatureAttribution, PredictionResult, DEFAULT_THRESHOLD,
};
use crate::ports::{ApiError, HealthStatus, ScoringApi};

/// Configuration for the HTTP scoring client.
#[derive(Debug, Clone)]
pub struct ScoringClientConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    pub health_timeout: Duration,
    pub prediction_timeout: Duration,
    pub population_timeout: Duration,
    /// Timeout for each of the two fetches of a pair analysis.
    pub pair_timeout: Duration,
}

impl ScoringClientConfig {
    /// Creates a configuration with the default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            health_timeout: Duration::from_secs(10),
            prediction_timeout: Duration::from_secs(30),
            population_timeout: Duration::from_secs(15),
            pair_timeout: Duration::from_secs(20),
        }
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn with_prediction_timeout(mut self, timeout: Duration) -> Self {
        self.prediction_timeout = timeout;
        self
    }

    pub fn with_population_timeout(mut self, timeout: Duration) -> Self {
        self.population_timeout = timeout;
        self
    }

    pub fn with_pair_timeout(mut self, timeout: Duration) -> Self {
        self.pair_timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl From<&ApiConfig> for ScoringClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self::new(config.base_url.clone())
            .with_health_timeout(Duration::from_secs(config.health_timeout_secs))
            .with_prediction_timeout(Duration::from_secs(config.prediction_timeout_secs))
            .with_population_timeout(Duration::from_secs(config.population_timeout_secs))
            .with_pair_timeout(Duration::from_secs(config.pair_timeout_secs))
    }
}

/// Scoring service client over HTTP/JSON.
pub struct HttpScoringClient {
    config: ScoringClientConfig,
    client: Client,
}

impl HttpScoringClient {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// - `ConnectionFailure` if the HTTP client cannot be built
    pub fn new(config: ScoringClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::connection_failure(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ScoringClientConfig {
        &self.config
    }

    /// Sends a request and decodes a 2xx JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<T, ApiError> {
        tracing::debug!(endpoint, timeout_secs = timeout.as_secs(), "Calling scoring API");

        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(&e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&e, timeout))?;

        if !status.is_success() {
            tracing::warn!(endpoint, status = status.as_u16(), "Scoring API returned an error status");
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        decode(&body)
    }

    async fn fetch_population(
        &self,
        feature: Feature,
        timeout: Duration,
    ) -> Result<PopulationDistribution, ApiError> {
        let path = format!("population/{}", feature.api_name());
        let request = self.client.get(self.config.url(&path));
        let body: PopulationResponse = self.execute(&path, request, timeout).await?;
        Ok(PopulationDistribution::new(feature, body.values))
    }
}

#[async_trait]
impl ScoringApi for HttpScoringClient {
    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let request = self.client.get(self.config.url("health"));
        self.execute("health", request, self.config.health_timeout).await
    }

    async fn predict(&self, payload: &ApiPayload) -> Result<PredictionResult, ApiError> {
        let request = self
            .client
            .post(self.config.url("predict_dashboard"))
            .json(payload);
        let body: PredictResponse = self
            .execute("predict_dashboard", request, self.config.prediction_timeout)
            .await?;
        body.into_result()
    }

    async fn population(&self, feature: Feature) -> Result<PopulationDistribution, ApiError> {
        self.fetch_population(feature, self.config.population_timeout)
            .await
    }

    async fn population_stats(&self) -> Result<PopulationStats, ApiError> {
        let request = self.client.get(self.config.url("population_stats"));
        self.execute("population_stats", request, self.config.population_timeout)
            .await
    }

    async fn population_pair(
        &self,
        var1: Feature,
        var2: Feature,
    ) -> Result<(PopulationDistribution, PopulationDistribution), ApiError> {
        let timeout = self.config.pair_timeout;
        tokio::try_join!(
            self.fetch_population(var1, timeout),
            self.fetch_population(var2, timeout)
        )
    }
}

fn transport_error(err: &reqwest::Error, timeout: Duration) -> ApiError {
    if err.is_timeout() {
        ApiError::timeout(timeout.as_secs())
    } else if err.is_connect() {
        ApiError::connection_failure(err.to_string())
    } else if err.is_decode() {
        ApiError::malformed(err.to_string())
    } else {
        ApiError::connection_failure(err.to_string())
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::malformed(e.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct PredictResponse {
    prediction: WirePrediction,
    #[serde(default)]
    explanation: Option<WireExplanation>,
}

#[derive(Debug, Deserialize)]
struct WirePrediction {
    probability: f64,
    #[serde(default)]
    decision: Option<String>,
    #[serde(default, alias = "decision_fr")]
    decision_label: Option<String>,
    #[serde(default)]
    risk_level: Option<String>,
    #[serde(default)]
    threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireExplanation {
    #[serde(default)]
    top_features: Vec<WireAttribution>,
}

#[derive(Debug, Deserialize)]
struct WireAttribution {
    feature: String,
    shap_value: f64,
}

#[derive(Debug, Deserialize)]
struct PopulationResponse {
    values: Vec<FeatureValue>,
}

impl PredictResponse {
    fn into_result(self) -> Result<PredictionResult, ApiError> {
        let p = self.prediction;
        let threshold = p.threshold.unwrap_or(DEFAULT_THRESHOLD);

        let decision = match p.decision.as_deref().and_then(Decision::parse) {
            Some(decision) => decision,
            None => {
                tracing::warn!(decision = ?p.decision, "Unrecognised decision, deriving from threshold");
                Decision::from_probability(p.probability, threshold)
            }
        };

        let attributions = self
            .explanation
            .map(|e| e.top_features)
            .unwrap_or_default()
            .into_iter()
            .map(|a| FeatureAttribution::ranked(a.feature, a.shap_value))
            .collect();

        PredictionResult::new(
            p.probability,
            decision,
            p.decision_label.unwrap_or_default(),
            p.risk_level.unwrap_or_else(|| "Unknown".to_string()),
            threshold,
            attributions,
        )
        .map_err(|e| ApiError::malformed(e.to_string()))
    }
}
