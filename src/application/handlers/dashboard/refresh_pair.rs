//! RefreshPairHandler - Drops a cached pair analysis.

use std::sync::Arc;

use super::DashboardSession;
use crate::domain::cache::BivariateCacheKeyer;
use crate::domain::client::Feature;

/// Command to refresh the `(var1, var2)` analysis.
#[derive(Debug, Clone)]
pub struct RefreshPairCommand {
    pub var1: Feature,
    pub var2: Feature,
}

/// Handler for the pair "refresh" action.
///
/// The next analysis of the same pair refetches both samples.
pub struct RefreshPairHandler {
    session: Arc<DashboardSession>,
}

impl RefreshPairHandler {
    pub fn new(session: Arc<DashboardSession>) -> Self {
        Self { session }
    }

    /// Returns true if an entry was removed.
    pub fn handle(&self, cmd: RefreshPairCommand) -> bool {
        let key = BivariateCacheKeyer::key(cmd.var1, cmd.var2);
        let removed = self.session.cache().remove(&key).is_some();
        tracing::debug!(key = %key, removed, "Pair analysis refreshed");
        removed
    }
}
