//! NewClientHandler - Starts over with an empty form.

use std::sync::Arc;

use super::{DashboardError, DashboardSession};
use crate::domain::client::ClientRecord;

/// Handler for the "new client" action.
///
/// Drops the record, the prediction, the form draft and every
/// session-scoped cache entry. Health and population statistics stay
/// cached.
pub struct NewClientHandler {
    session: Arc<DashboardSession>,
}

impl NewClientHandler {
    pub fn new(session: Arc<DashboardSession>) -> Self {
        Self { session }
    }

    pub fn handle(&self) -> Result<ClientRecord, DashboardError> {
        let (mut state, mut cache) = self.session.state_and_cache();
        let from = state.phase();
        let invalidated = state.new_client(&mut *cache)?;

        tracing::info!(
            session_id = %self.session.id(),
            %from,
            to = %state.phase(),
            invalidated,
            "Session reset for new client"
        );
        Ok(state.form_values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockScoringApi;
    use crate::config::CacheConfig;
    use crate::domain::session::SessionPhase;

    #[test]
    fn new_client_from_idle_returns_defaults() {
        let session = Arc::new(DashboardSession::new(
            Arc::new(MockScoringApi::new()),
            CacheConfig::default(),
        ));

        let form = NewClientHandler::new(session.clone()).handle().unwrap();

        assert_eq!(form, ClientRecord::default());
        assert_eq!(session.phase(), SessionPhase::Idle);
    }
}
