//! DashboardSession - state shared by every dashboard handler.
//!
//! One per analyst session. Holds the state machine, the cache store and
//! the scoring API collaborator. Locks are never held across an await.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::CacheConfig;
use crate::domain::cache::{CacheKey, CacheStore, PairPayload};
use crate::domain::foundation::{AnalystSessionId, Timestamp};
use crate::domain::population::{PairAnalysis, PopulationDistribution, PopulationStats};
use crate::domain::session::{SessionPhase, SessionStateMachine};
use crate::ports::{HealthStatus, ScoringApi};

/// Payloads kept in the session cache.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedPayload {
    Health(HealthStatus),
    Population(PopulationDistribution),
    Pair(PairAnalysis),
    Stats(PopulationStats),
}

impl PairPayload for CachedPayload {
    fn as_pair(&self) -> Option<&PairAnalysis> {
        match self {
            CachedPayload::Pair(pair) => Some(pair),
            _ => None,
        }
    }
}

/// Session state shared by the dashboard handlers.
pub struct DashboardSession {
    id: AnalystSessionId,
    api: Arc<dyn ScoringApi>,
    state: Mutex<SessionStateMachine>,
    cache: Mutex<CacheStore<CachedPayload>>,
    ttl: CacheConfig,
}

impl DashboardSession {
    pub fn new(api: Arc<dyn ScoringApi>, ttl: CacheConfig) -> Self {
        let id = AnalystSessionId::new();
        tracing::info!(session_id = %id, "Analyst session started");
        Self {
            id,
            api,
            state: Mutex::new(SessionStateMachine::new()),
            cache: Mutex::new(CacheStore::new()),
            ttl,
        }
    }

    pub fn id(&self) -> AnalystSessionId {
        self.id
    }

    pub fn api(&self) -> &dyn ScoringApi {
        self.api.as_ref()
    }

    pub fn ttl(&self) -> &CacheConfig {
        &self.ttl
    }

    pub fn phase(&self) -> SessionPhase {
        self.state().phase()
    }

    /// Copy of the current session state.
    pub fn snapshot(&self) -> SessionStateMachine {
        self.state().clone()
    }

    /// Whether a live cache entry exists for `key`.
    pub fn is_cached(&self, key: &CacheKey) -> bool {
        self.cache().get(key).is_some()
    }

    pub(super) fn state(&self) -> MutexGuard<'_, SessionStateMachine> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn cache(&self) -> MutexGuard<'_, CacheStore<CachedPayload>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks state then cache, always in that order.
    pub(super) fn state_and_cache(
        &self,
    ) -> (
        MutexGuard<'_, SessionStateMachine>,
        MutexGuard<'_, CacheStore<CachedPayload>>,
    ) {
        let state = self.state();
        let cache = self.cache();
        (state, cache)
    }

    /// Returns the cached payload for `key`, if live.
    pub(super) fn cached(&self, key: &CacheKey) -> Option<CachedPayload> {
        self.cache().get(key).map(|entry| entry.payload.clone())
    }

    /// Stores a session-scoped payload unless the analysis it was fetched
    /// for has since been reset.
    pub(super) fn cache_for_analysis(
        &self,
        analyzed_at: Option<Timestamp>,
        key: CacheKey,
        payload: CachedPayload,
        ttl_secs: u64,
    ) -> bool {
        let (state, mut cache) = self.state_and_cache();
        if state.analyzed_at() != analyzed_at || analyzed_at.is_none() {
            tracing::debug!(key = %key, "Analysis changed during fetch, not caching");
            return false;
        }
        cache.put(key, payload, ttl_secs);
        true
    }
}
