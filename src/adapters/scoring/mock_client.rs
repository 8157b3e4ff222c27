//! Mock Scoring API for testing.
//!
//! Provides a configurable implementation of the ScoringApi port so
//! sessions can be driven without a running scoring service.
//!
//! # Features
//!
//! - Queued responses per endpoint (consumed in order)
//! - Sensible defaults once a queue is empty
//! - Simulated latency for re-entrancy tests
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let api = MockScoringApi::new()
//!     .with_prediction(result)
//!     .with_delay(Duration::from_millis(50));
//!
//! let prediction = api.predict(&payload).await?;
//! assert_eq!(api.predict_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::client::{ApiPayload, Feature, FeatureValue};
use crate::domain::population::{PopulationDistribution, PopulationStats};
use crate::domain::prediction::{Decision, PredictionResult, DEFAULT_THRESHOLD};
use crate::ports::{ApiError, HealthStatus, ScoringApi};

/// Size of the generated default population sample.
const DEFAULT_SAMPLE_SIZE: usize = 100;

/// A recorded call to the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Health,
    Predict(ApiPayload),
    Population(Feature),
    PopulationStats,
}

type Queue<T> = Arc<Mutex<VecDeque<Result<T, ApiError>>>>;

/// Mock scoring API for testing.
#[derive(Debug, Clone, Default)]
pub struct MockScoringApi {
    health: Queue<HealthStatus>,
    predictions: Queue<PredictionResult>,
    populations: Arc<Mutex<HashMap<Feature, VecDeque<Result<PopulationDistribution, ApiError>>>>>,
    stats: Queue<PopulationStats>,
    /// Simulated latency per request.
    delay: Duration,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockScoringApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_health(self, status: impl Into<String>) -> Self {
        lock(&self.health).push_back(Ok(HealthStatus::new(status)));
        self
    }

    pub fn with_health_error(self, error: ApiError) -> Self {
        lock(&self.health).push_back(Err(error));
        self
    }

    pub fn with_prediction(self, result: PredictionResult) -> Self {
        lock(&self.predictions).push_back(Ok(result));
        self
    }

    pub fn with_prediction_error(self, error: ApiError) -> Self {
        lock(&self.predictions).push_back(Err(error));
        self
    }

    /// Queues a sample for its feature.
    pub fn with_population(self, distribution: PopulationDistribution) -> Self {
        lock(&self.populations)
            .entry(distribution.feature)
            .or_default()
            .push_back(Ok(distribution));
        self
    }

    pub fn with_population_error(self, feature: Feature, error: ApiError) -> Self {
        lock(&self.populations)
            .entry(feature)
            .or_default()
            .push_back(Err(error));
        self
    }

    pub fn with_population_stats(self, stats: PopulationStats) -> Self {
        lock(&self.stats).push_back(Ok(stats));
        self
    }

    pub fn with_population_stats_error(self, error: ApiError) -> Self {
        lock(&self.stats).push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn health_count(&self) -> usize {
        self.count(|c| matches!(c, MockCall::Health))
    }

    pub fn predict_count(&self) -> usize {
        self.count(|c| matches!(c, MockCall::Predict(_)))
    }

    pub fn population_count(&self, feature: Feature) -> usize {
        self.count(|c| *c == MockCall::Population(feature))
    }

    pub fn stats_count(&self) -> usize {
        self.count(|c| matches!(c, MockCall::PopulationStats))
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    fn count(&self, predicate: impl Fn(&MockCall) -> bool) -> usize {
        lock(&self.calls).iter().filter(|c| predicate(c)).count()
    }

    async fn record(&self, call: MockCall) {
        lock(&self.calls).push(call);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

/// Default prediction: approved, well below the default threshold.
fn default_prediction() -> Result<PredictionResult, ApiError> {
    PredictionResult::new(
        0.05,
        Decision::Approve,
        "Approved",
        "Low",
        DEFAULT_THRESHOLD,
        Vec::new(),
    )
    .map_err(|e| ApiError::malformed(e.to_string()))
}

/// Default sample with values shaped like the real feature.
fn default_population(feature: Feature) -> PopulationDistribution {
    let values = (0..DEFAULT_SAMPLE_SIZE)
        .map(|i| match feature {
            Feature::CodeGender => FeatureValue::from(if i % 2 == 0 { "F" } else { "M" }),
            Feature::HigherEducation => FeatureValue::Flag(i % 4 == 0),
            Feature::DaysEmployed => FeatureValue::Integer(-(i as i64) * 30),
            _ => FeatureValue::Number(i as f64 / DEFAULT_SAMPLE_SIZE as f64),
        })
        .collect();
    PopulationDistribution::new(feature, values)
}

#[async_trait]
impl ScoringApi for MockScoringApi {
    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.record(MockCall::Health).await;
        lock(&self.health)
            .pop_front()
            .unwrap_or_else(|| Ok(HealthStatus::new("healthy")))
    }

    async fn predict(&self, payload: &ApiPayload) -> Result<PredictionResult, ApiError> {
        self.record(MockCall::Predict(payload.clone())).await;
        let queued = lock(&self.predictions).pop_front();
        queued.unwrap_or_else(default_prediction)
    }

    async fn population(&self, feature: Feature) -> Result<PopulationDistribution, ApiError> {
        self.record(MockCall::Population(feature)).await;
        let queued = lock(&self.populations)
            .get_mut(&feature)
            .and_then(VecDeque::pop_front);
        queued.unwrap_or_else(|| Ok(default_population(feature)))
    }

    async fn population_stats(&self) -> Result<PopulationStats, ApiError> {
        self.record(MockCall::PopulationStats).await;
        let queued = lock(&self.stats).pop_front();
        queued.unwrap_or_else(|| {
            Ok(PopulationStats(serde_json::json!({
                "total_clients": DEFAULT_SAMPLE_SIZE,
                "default_rate": 0.08
            })))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::{ClientRecord, ClientRecordCodec};

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let first = PredictionResult::new(0.3, Decision::Refuse, "", "High", 0.1, vec![]).unwrap();
        let api = MockScoringApi::new()
            .with_prediction(first.clone())
            .with_prediction_error(ApiError::timeout(30));
        let payload = ClientRecordCodec::to_api(&ClientRecord::default());

        assert_eq!(api.predict(&payload).await.unwrap(), first);
        assert_eq!(api.predict(&payload).await.unwrap_err(), ApiError::timeout(30));
        assert_eq!(api.predict(&payload).await.unwrap().decision(), Decision::Approve);
        assert_eq!(api.predict_count(), 3);
    }

    #[tokio::test]
    async fn population_queues_are_per_feature() {
        let sample = PopulationDistribution::new(Feature::AmtAnnuity, vec![FeatureValue::Number(1.0)]);
        let api = MockScoringApi::new().with_population(sample.clone());

        assert_eq!(api.population(Feature::AmtAnnuity).await.unwrap(), sample);
        assert_eq!(api.population(Feature::ExtSource1).await.unwrap().len(), DEFAULT_SAMPLE_SIZE);
        assert_eq!(api.population_count(Feature::AmtAnnuity), 1);
    }

    #[tokio::test]
    async fn default_pair_fetches_both_samples() {
        let api = MockScoringApi::new();

        let (x, y) = api
            .population_pair(Feature::CodeGender, Feature::HigherEducation)
            .await
            .unwrap();

        assert_eq!(x.feature, Feature::CodeGender);
        assert_eq!(y.feature, Feature::HigherEducation);
        assert_eq!(
            api.calls(),
            vec![
                MockCall::Population(Feature::CodeGender),
                MockCall::Population(Feature::HigherEducation)
            ]
        );
    }

    #[tokio::test]
    async fn health_defaults_to_healthy() {
        let api = MockScoringApi::new().with_health_error(ApiError::connection_failure("down"));

        assert!(api.health().await.is_err());
        assert_eq!(api.health().await.unwrap().status, "healthy");
        assert_eq!(api.health_count(), 2);
    }
}
