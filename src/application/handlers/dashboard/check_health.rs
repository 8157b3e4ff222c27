//! CheckHealthHandler - Verifies the scoring API before offering analysis.
//!
//! A healthy answer is cached; a failure is fatal to the session and is
//! never cached.

use std::sync::Arc;

use super::{CachedPayload, DashboardError, DashboardSession};
use crate::domain::cache::CacheKey;
use crate::ports::HealthStatus;

/// Command to check scoring API health.
#[derive(Debug, Clone, Default)]
pub struct CheckHealthCommand {
    /// Skip the cached answer.
    pub force_refresh: bool,
}

/// Handler for the health check.
pub struct CheckHealthHandler {
    session: Arc<DashboardSession>,
}

impl CheckHealthHandler {
    pub fn new(session: Arc<DashboardSession>) -> Self {
        Self { session }
    }

    pub async fn handle(&self, cmd: CheckHealthCommand) -> Result<HealthStatus, DashboardError> {
        let key = CacheKey::health();
        if !cmd.force_refresh {
            if let Some(CachedPayload::Health(status)) = self.session.cached(&key) {
                return Ok(status);
            }
        }

        match self.session.api().health().await {
            Ok(status) => {
                self.session.cache().put(
                    key,
                    CachedPayload::Health(status.clone()),
                    self.session.ttl().health_ttl_secs,
                );
                Ok(status)
            }
            Err(err) => {
                tracing::error!(session_id = %self.session.id(), error = %err, "Scoring API health check failed");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockScoringApi;
    use crate::config::CacheConfig;
    use crate::ports::ApiError;

    fn handler(api: MockScoringApi) -> (CheckHealthHandler, Arc<DashboardSession>) {
        let session = Arc::new(DashboardSession::new(Arc::new(api), CacheConfig::default()));
        (CheckHealthHandler::new(session.clone()), session)
    }

    #[tokio::test]
    async fn healthy_answer_is_cached() {
        let api = MockScoringApi::new().with_health("healthy");
        let (handler, session) = handler(api.clone());

        handler.handle(CheckHealthCommand::default()).await.unwrap();
        handler.handle(CheckHealthCommand::default()).await.unwrap();

        assert_eq!(api.health_count(), 1);
        assert!(session.is_cached(&CacheKey::health()));
    }

    #[tokio::test]
    async fn force_refresh_bypasses_cache() {
        let api = MockScoringApi::new();
        let (handler, _) = handler(api.clone());

        handler.handle(CheckHealthCommand::default()).await.unwrap();
        handler
            .handle(CheckHealthCommand { force_refresh: true })
            .await
            .unwrap();

        assert_eq!(api.health_count(), 2);
    }

    #[tokio::test]
    async fn failure_is_reported_and_not_cached() {
        let api = MockScoringApi::new().with_health_error(ApiError::timeout(10));
        let (handler, session) = handler(api);

        let err = handler.handle(CheckHealthCommand::default()).await.unwrap_err();

        assert_eq!(err, DashboardError::Api(ApiError::timeout(10)));
        assert!(!session.is_cached(&CacheKey::health()));
    }
}
