//! GetPopulationStatsHandler - Aggregate statistics of the scored population.

use std::sync::Arc;

use super::{CachedPayload, DashboardError, DashboardSession};
use crate::domain::cache::CacheKey;
use crate::domain::population::PopulationStats;

/// Query for the population statistics panel.
#[derive(Debug, Clone, Default)]
pub struct GetPopulationStatsQuery {
    pub force_refresh: bool,
}

/// Handler for population statistics.
///
/// Statistics do not depend on the client, so they survive a reset.
pub struct GetPopulationStatsHandler {
    session: Arc<DashboardSession>,
}

impl GetPopulationStatsHandler {
    pub fn new(session: Arc<DashboardSession>) -> Self {
        Self { session }
    }

    pub async fn handle(
        &self,
        query: GetPopulationStatsQuery,
    ) -> Result<PopulationStats, DashboardError> {
        let key = CacheKey::population_stats();
        if !query.force_refresh {
            if let Some(CachedPayload::Stats(stats)) = self.session.cached(&key) {
                return Ok(stats);
            }
        }

        let stats = self.session.api().population_stats().await?;
        self.session.cache().put(
            key,
            CachedPayload::Stats(stats.clone()),
            self.session.ttl().stats_ttl_secs,
        );
        Ok(stats)
    }
}
