//! ModifyClientHandler - Returns an analyzed client to the form for editing.

use std::sync::Arc;

use super::{DashboardError, DashboardSession};
use crate::domain::client::ClientRecord;
use crate::domain::session::SessionPhase;

/// Handler for the "modify" action.
///
/// Clears the prediction and the session-scoped caches, and returns the
/// record to pre-fill the form with.
pub struct ModifyClientHandler {
    session: Arc<DashboardSession>,
}

impl ModifyClientHandler {
    pub fn new(session: Arc<DashboardSession>) -> Self {
        Self { session }
    }

    pub fn handle(&self) -> Result<ClientRecord, DashboardError> {
        let (mut state, mut cache) = self.session.state_and_cache();
        let invalidated = state.modify(&mut *cache)?;

        tracing::info!(
            session_id = %self.session.id(),
            from = %SessionPhase::Analyzed,
            to = %SessionPhase::Idle,
            invalidated,
            "Session phase changed"
        );
        Ok(state.form_values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockScoringApi;
    use crate::application::handlers::dashboard::{AnalyzeClientCommand, AnalyzeClientHandler};
    use crate::config::CacheConfig;
    use crate::domain::session::SessionError;

    #[tokio::test]
    async fn modify_keeps_record_in_form() {
        let session = Arc::new(DashboardSession::new(
            Arc::new(MockScoringApi::new()),
            CacheConfig::default(),
        ));
        let record = ClientRecord {
            annuity: 30_000.0,
            ..Default::default()
        };
        AnalyzeClientHandler::new(session.clone())
            .handle(AnalyzeClientCommand {
                record: record.clone(),
            })
            .await
            .unwrap();

        let form = ModifyClientHandler::new(session.clone()).handle().unwrap();

        assert_eq!(form, record);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.snapshot().prediction().is_none());
    }

    #[test]
    fn modify_before_analysis_fails() {
        let session = Arc::new(DashboardSession::new(
            Arc::new(MockScoringApi::new()),
            CacheConfig::default(),
        ));

        let err = ModifyClientHandler::new(session).handle().unwrap_err();
        assert_eq!(err, DashboardError::Session(SessionError::NotAnalyzed));
    }
}
