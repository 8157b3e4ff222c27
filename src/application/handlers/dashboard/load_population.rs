//! LoadPopulationHandler - Places the client within one feature's population.

use serde::Serialize;
use std::sync::Arc;

use super::{CachedPayload, DashboardError, DashboardSession};
use crate::domain::cache::CacheKey;
use crate::domain::client::{ClientRecordCodec, Feature};
use crate::domain::population::{percentile_of, PopulationDistribution};
use crate::ports::ApiError;

/// Command to compare the client against one feature's population.
#[derive(Debug, Clone)]
pub struct LoadPopulationCommand {
    pub feature: Feature,
    /// Refetch even when a cached sample is live.
    pub force_refresh: bool,
}

impl LoadPopulationCommand {
    pub fn new(feature: Feature) -> Self {
        Self {
            feature,
            force_refresh: false,
        }
    }

    pub fn refresh(feature: Feature) -> Self {
        Self {
            feature,
            force_refresh: true,
        }
    }
}

/// Population sample with the client's position in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationComparison {
    pub distribution: PopulationDistribution,
    /// Client value on the histogram axis.
    pub client_value: f64,
    /// Share of the population at or below the client, in percent.
    pub percentile: f64,
    pub bins: usize,
    pub from_cache: bool,
}

/// Handler for population comparisons.
pub struct LoadPopulationHandler {
    session: Arc<DashboardSession>,
}

impl LoadPopulationHandler {
    pub fn new(session: Arc<DashboardSession>) -> Self {
        Self { session }
    }

    pub async fn handle(
        &self,
        cmd: LoadPopulationCommand,
    ) -> Result<PopulationComparison, DashboardError> {
        let feature = cmd.feature;
        let (payload, analyzed_at) = {
            let state = self.session.state();
            let (record, _) = state.analysis()?;
            (ClientRecordCodec::to_api(record), state.analyzed_at())
        };
        let client_value = ClientRecordCodec::client_axis_value(&payload, feature)?;

        let key = CacheKey::population(feature);
        let cached = if cmd.force_refresh {
            None
        } else {
            self.session.cached(&key)
        };
        let (distribution, from_cache) = match cached {
            Some(CachedPayload::Population(cached)) if cached.feature == feature => (cached, true),
            _ => {
                let fetched = self
                    .session
                    .api()
                    .population(feature)
                    .await
                    .and_then(ensure_not_empty)
                    .map_err(|err| {
                        tracing::warn!(feature = %feature, error = %err, "Population fetch failed");
                        err
                    })?;
                self.session.cache_for_analysis(
                    analyzed_at,
                    key,
                    CachedPayload::Population(fetched.clone()),
                    self.session.ttl().population_ttl_secs,
                );
                (fetched, false)
            }
        };

        Ok(PopulationComparison {
            percentile: percentile_of(&distribution.axis_values(), client_value),
            bins: distribution.histogram_bins(),
            client_value,
            distribution,
            from_cache,
        })
    }
}

/// Rejects a sample with no values; there is nothing to place the client in.
pub(super) fn ensure_not_empty(
    sample: PopulationDistribution,
) -> Result<PopulationDistribution, ApiError> {
    if sample.is_empty() {
        return Err(ApiError::validation(format!(
            "Insufficient population data for {}",
            sample.feature.label()
        )));
    }
    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockScoringApi;
    use crate::application::handlers::dashboard::{AnalyzeClientCommand, AnalyzeClientHandler};
    use crate::config::CacheConfig;
    use crate::domain::client::{ClientRecord, FeatureValue, Gender};
    use crate::domain::session::SessionError;

    async fn analyzed_session(api: MockScoringApi, record: ClientRecord) -> Arc<DashboardSession> {
        let session = Arc::new(DashboardSession::new(Arc::new(api), CacheConfig::default()));
        AnalyzeClientHandler::new(session.clone())
            .handle(AnalyzeClientCommand { record })
            .await
            .unwrap();
        session
    }

    #[tokio::test]
    async fn requires_an_analyzed_client() {
        let session = Arc::new(DashboardSession::new(
            Arc::new(MockScoringApi::new()),
            CacheConfig::default(),
        ));
        let err = LoadPopulationHandler::new(session)
            .handle(LoadPopulationCommand::new(Feature::AmtAnnuity))
            .await
            .unwrap_err();

        assert_eq!(err, DashboardError::Session(SessionError::NotAnalyzed));
    }

    #[tokio::test]
    async fn second_load_is_served_from_cache() {
        let api = MockScoringApi::new();
        let session = analyzed_session(api.clone(), ClientRecord::default()).await;
        let handler = LoadPopulationHandler::new(session);
        let cmd = LoadPopulationCommand::new(Feature::ExtSource2);

        let first = handler.handle(cmd.clone()).await.unwrap();
        let second = handler.handle(cmd).await.unwrap();

        assert!(!first.from_cache);
        assert!(second.from_cache);
        assert_eq!(api.population_count(Feature::ExtSource2), 1);
    }

    #[tokio::test]
    async fn gender_client_is_positioned_on_numeric_axis() {
        let sample = PopulationDistribution::new(
            Feature::CodeGender,
            vec!["F".into(), "F".into(), "M".into(), "F".into()],
        );
        let api = MockScoringApi::new().with_population(sample);
        let record = ClientRecord {
            gender: Gender::Male,
            ..Default::default()
        };
        let session = analyzed_session(api, record).await;

        let comparison = LoadPopulationHandler::new(session)
            .handle(LoadPopulationCommand::new(Feature::CodeGender))
            .await
            .unwrap();

        assert_eq!(comparison.client_value, 1.0);
        assert_eq!(comparison.percentile, 100.0);
        assert_eq!(comparison.bins, 10);
    }

    #[tokio::test]
    async fn empty_sample_is_an_error_and_not_cached() {
        let api = MockScoringApi::new()
            .with_population(PopulationDistribution::new(Feature::ExtSource2, vec![]));
        let session = analyzed_session(api, ClientRecord::default()).await;

        let err = LoadPopulationHandler::new(session.clone())
            .handle(LoadPopulationCommand::new(Feature::ExtSource2))
            .await
            .unwrap_err();

        assert!(matches!(err, DashboardError::Api(ApiError::Validation(_))));
        assert!(err.user_message().contains("Insufficient population data"));
        assert!(!session.is_cached(&CacheKey::population(Feature::ExtSource2)));
    }

    #[tokio::test]
    async fn force_refresh_refetches_a_cached_sample() {
        let api = MockScoringApi::new();
        let session = analyzed_session(api.clone(), ClientRecord::default()).await;
        let handler = LoadPopulationHandler::new(session);

        handler
            .handle(LoadPopulationCommand::new(Feature::AmtAnnuity))
            .await
            .unwrap();
        let refreshed = handler
            .handle(LoadPopulationCommand::refresh(Feature::AmtAnnuity))
            .await
            .unwrap();

        assert!(!refreshed.from_cache);
        assert_eq!(api.population_count(Feature::AmtAnnuity), 2);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_cache_untouched() {
        let api = MockScoringApi::new()
            .with_population(PopulationDistribution::new(
                Feature::PaymentRate,
                vec![FeatureValue::Number(0.1)],
            ))
            .with_population_error(Feature::AmtAnnuity, ApiError::timeout(15));
        let session = analyzed_session(api, ClientRecord::default()).await;
        let handler = LoadPopulationHandler::new(session.clone());

        handler
            .handle(LoadPopulationCommand::new(Feature::PaymentRate))
            .await
            .unwrap();
        let err = handler
            .handle(LoadPopulationCommand::new(Feature::AmtAnnuity))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Timeout - the API is too slow, please retry");
        assert!(session.is_cached(&CacheKey::population(Feature::PaymentRate)));
        assert!(!session.is_cached(&CacheKey::population(Feature::AmtAnnuity)));
    }
}
