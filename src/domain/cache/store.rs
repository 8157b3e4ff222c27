//! CacheStore - in-memory key/entry store with TTL and prefix invalidation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::domain::client::Feature;
use crate::domain::foundation::Timestamp;

/// Cache family a key belongs to, identified by its key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheScope {
    Health,
    Population,
    Pair,
    PopulationStats,
}

impl CacheScope {
    pub fn prefix(&self) -> &'static str {
        match self {
            CacheScope::Health => "health_",
            CacheScope::Population => "population_data_",
            CacheScope::Pair => "bivariate_",
            CacheScope::PopulationStats => "population_stats",
        }
    }

    /// Families tied to the current client; wiped on reset.
    pub fn session_scoped() -> &'static [CacheScope] {
        &[CacheScope::Population, CacheScope::Pair]
    }

    pub fn is_session_scoped(&self) -> bool {
        Self::session_scoped().contains(self)
    }

    fn all() -> [CacheScope; 4] {
        [
            CacheScope::Health,
            CacheScope::Population,
            CacheScope::Pair,
            CacheScope::PopulationStats,
        ]
    }
}

/// Cache key; its leading segment names the family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn health() -> Self {
        Self(format!("{}check", CacheScope::Health.prefix()))
    }

    pub fn population(feature: Feature) -> Self {
        Self(format!("{}{}", CacheScope::Population.prefix(), feature.api_name()))
    }

    pub fn population_stats() -> Self {
        Self(CacheScope::PopulationStats.prefix().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Family of this key, if it carries a known prefix.
    pub fn scope(&self) -> Option<CacheScope> {
        CacheScope::all()
            .into_iter()
            .find(|scope| self.starts_with(scope.prefix()))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cached payload with its creation time and lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub key: CacheKey,
    pub payload: T,
    pub created_at: Timestamp,
    pub ttl_secs: u64,
}

impl<T> CacheEntry<T> {
    /// Expired once `ttl_secs` have elapsed since creation.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        let elapsed_ms = now.duration_since(&self.created_at).num_milliseconds();
        let ttl_ms = i64::try_from(self.ttl_secs.saturating_mul(1000)).unwrap_or(i64::MAX);
        elapsed_ms >= ttl_ms
    }
}

/// Key to entry store with lazy TTL expiry.
///
/// # Invariants
///
/// - `get` never returns an expired entry
/// - Expired entries are not evicted on read; they linger until
///   overwritten, removed or invalidated
#[derive(Debug, Clone)]
pub struct CacheStore<T> {
    entries: HashMap<CacheKey, CacheEntry<T>>,
}

impl<T> Default for CacheStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CacheStore<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the live entry for `key`, or `None` if absent or expired.
    pub fn get(&self, key: &CacheKey) -> Option<&CacheEntry<T>> {
        self.get_at(key, Timestamp::now())
    }

    pub fn get_at(&self, key: &CacheKey, now: Timestamp) -> Option<&CacheEntry<T>> {
        self.entries.get(key).filter(|entry| !entry.is_expired_at(now))
    }

    /// Stores `payload`, replacing any entry under the same key.
    pub fn put(&mut self, key: CacheKey, payload: T, ttl_secs: u64) {
        self.put_at(key, payload, ttl_secs, Timestamp::now());
    }

    pub fn put_at(&mut self, key: CacheKey, payload: T, ttl_secs: u64, now: Timestamp) {
        let entry = CacheEntry {
            key: key.clone(),
            payload,
            created_at: now,
            ttl_secs,
        };
        self.entries.insert(key, entry);
    }

    pub fn remove(&mut self, key: &CacheKey) -> Option<CacheEntry<T>> {
        self.entries.remove(key)
    }

    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - self.entries.len();
        tracing::debug!(prefix, removed, "Invalidated cache prefix");
        removed
    }

    /// Removes every entry of every session-scoped family.
    pub fn invalidate_session_scopes(&mut self) -> usize {
        CacheScope::session_scoped()
            .iter()
            .map(|scope| self.invalidate_prefix(scope.prefix()))
            .sum()
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a key is stored, regardless of expiry.
    pub fn contains_key(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }
}
