//! AnalyzeClientHandler - Submits the form record for scoring.
//!
//! The submission guard is engaged before the request goes out, so a
//! second trigger while the first is in flight is rejected without
//! reaching the scoring API.

use std::sync::Arc;

use super::{AnalysisView, DashboardError, DashboardSession};
use crate::domain::client::{ClientRecord, ClientRecordCodec};
use crate::domain::session::SessionPhase;

/// Command to analyze one client.
#[derive(Debug, Clone)]
pub struct AnalyzeClientCommand {
    pub record: ClientRecord,
}

/// Handler for client analysis.
pub struct AnalyzeClientHandler {
    session: Arc<DashboardSession>,
}

impl AnalyzeClientHandler {
    pub fn new(session: Arc<DashboardSession>) -> Self {
        Self { session }
    }

    pub async fn handle(&self, cmd: AnalyzeClientCommand) -> Result<AnalysisView, DashboardError> {
        let session_id = self.session.id();

        // 1. Engage the guard (validates the record first)
        self.session.state().begin_submission(cmd.record.clone())?;
        tracing::info!(%session_id, from = %SessionPhase::Idle, to = %SessionPhase::Submitting, "Session phase changed");

        // 2. Call the scoring API without holding any lock
        let payload = ClientRecordCodec::to_api(&cmd.record);
        let outcome = self.session.api().predict(&payload).await;

        // 3. Settle the submission
        let mut state = self.session.state();
        match outcome {
            Ok(prediction) => {
                let view = AnalysisView::build(&cmd.record, &prediction);
                state.complete_submission(prediction)?;
                tracing::info!(
                    %session_id,
                    from = %SessionPhase::Submitting,
                    to = %SessionPhase::Analyzed,
                    decision = %view.prediction.decision(),
                    probability = view.prediction.probability(),
                    "Session phase changed"
                );
                Ok(view)
            }
            Err(err) => {
                state.fail_submission(err.user_message())?;
                tracing::warn!(%session_id, error = %err, "Analysis failed, form values kept");
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
    use crate::domain::prediction::{Decision, FeatureAttribution, PredictionResult};
    use crate::domain::session::SessionError;
    use crate::ports::ApiError;
    use std::time::Duration;

    fn session(api: MockScoringApi) -> Arc<DashboardSession> {
        Arc::new(DashboardSession::new(Arc::new(api), CacheConfig::default()))
    }

    fn refused() -> PredictionResult {
        PredictionResult::new(
            0.35,
            Decision::Refuse,
            "Refused",
            "High",
            0.10,
            vec![FeatureAttribution::ranked("EXT_SOURCE_3", 0.2)],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn successful_analysis_moves_to_analyzed() {
        let api = MockScoringApi::new().with_prediction(refused());
        let session = session(api.clone());
        let handler = AnalyzeClientHandler::new(session.clone());

        let view = handler
            .handle(AnalyzeClientCommand {
                record: ClientRecord::default(),
            })
            .await
            .unwrap();

        assert_eq!(view.prediction.decision(), Decision::Refuse);
        assert_eq!(view.features.len(), 10);
        assert_eq!(session.phase(), SessionPhase::Analyzed);
        assert_eq!(api.predict_count(), 1);
    }

    #[tokio::test]
    async fn sends_api_native_payload() {
        let api = MockScoringApi::new();
        let handler = AnalyzeClientHandler::new(session(api.clone()));
        let record = ClientRecord::default();

        handler
            .handle(AnalyzeClientCommand {
                record: record.clone(),
            })
            .await
            .unwrap();

        assert_eq!(
            api.calls(),
            vec![crate::adapters::MockCall::Predict(ClientRecordCodec::to_api(&record))]
        );
    }

    #[tokio::test]
    async fn failure_returns_to_idle_with_draft() {
        let api = MockScoringApi::new().with_prediction_error(ApiError::http_status(500, "boom"));
        let session = session(api);
        let handler = AnalyzeClientHandler::new(session.clone());
        let record = ClientRecord {
            dpd_mean: 4.0,
            ..Default::default()
        };

        let err = handler
            .handle(AnalyzeClientCommand {
                record: record.clone(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "API error 500: boom");
        let state = session.snapshot();
        assert_eq!(state.phase(), SessionPhase::Idle);
        assert!(!state.is_submitting());
        assert_eq!(state.form_values(), record);
    }

    #[tokio::test]
    async fn concurrent_submission_makes_one_call() {
        let api = MockScoringApi::new().with_delay(Duration::from_millis(50));
        let handler = AnalyzeClientHandler::new(session(api.clone()));
        let cmd = AnalyzeClientCommand {
            record: ClientRecord::default(),
        };

        let (first, second) = tokio::join!(handler.handle(cmd.clone()), handler.handle(cmd));

        assert!(first.is_ok());
        assert_eq!(
            second.unwrap_err(),
            DashboardError::Session(SessionError::SubmissionInProgress)
        );
        assert_eq!(api.predict_count(), 1);
    }

    #[tokio::test]
    async fn invalid_record_never_reaches_api() {
        let api = MockScoringApi::new();
        let handler = AnalyzeClientHandler::new(session(api.clone()));
        let record = ClientRecord {
            ext_source_1: -0.1,
            ..Default::default()
        };

        let err = handler.handle(AnalyzeClientCommand { record }).await.unwrap_err();

        assert!(matches!(err, DashboardError::Session(SessionError::Validation(_))));
        assert_eq!(api.call_count(), 0);
    }
}
