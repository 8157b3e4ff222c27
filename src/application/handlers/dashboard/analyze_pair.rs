//! AnalyzePairHandler - Scatter of two features with the client's position.
//!
//! The pair is built from two independent population samples zipped by
//! index, so the correlation reflects sample order rather than true joint
//! observations.

use serde::Serialize;
use std::sync::Arc;

use super::load_population::ensure_not_empty;
use super::{CachedPayload, DashboardError, DashboardSession};
use crate::domain::cache::BivariateCacheKeyer;
use crate::domain::client::{ClientRecordCodec, Feature};
use crate::domain::population::{PairAnalysis, PairSummary};

/// Command to analyze `var1` (x axis) against `var2` (y axis).
#[derive(Debug, Clone)]
pub struct AnalyzePairCommand {
    pub var1: Feature,
    pub var2: Feature,
}

/// Pair analysis with the client's position in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairOutcome {
    pub analysis: PairAnalysis,
    pub summary: PairSummary,
    pub from_cache: bool,
}

/// Handler for pair analyses.
pub struct AnalyzePairHandler {
    session: Arc<DashboardSession>,
}

impl AnalyzePairHandler {
    pub fn new(session: Arc<DashboardSession>) -> Self {
        Self { session }
    }

    pub async fn handle(&self, cmd: AnalyzePairCommand) -> Result<PairOutcome, DashboardError> {
        let AnalyzePairCommand { var1, var2 } = cmd;
        let (payload, analyzed_at) = {
            let state = self.session.state();
            let (record, _) = state.analysis()?;
            (ClientRecordCodec::to_api(record), state.analyzed_at())
        };
        let client_x = ClientRecordCodec::client_axis_value(&payload, var1)?;
        let client_y = ClientRecordCodec::client_axis_value(&payload, var2)?;

        let cached = BivariateCacheKeyer::lookup(&mut *self.session.cache(), var1, var2);
        let (analysis, from_cache) = match cached {
            Some(analysis) => (analysis, true),
            None => {
                let (x, y) = self
                    .session
                    .api()
                    .population_pair(var1, var2)
                    .await
                    .and_then(|(x, y)| Ok((ensure_not_empty(x)?, ensure_not_empty(y)?)))
                    .map_err(|err| {
                        tracing::warn!(var1 = %var1, var2 = %var2, error = %err, "Pair fetch failed");
                        err
                    })?;
                let analysis = BivariateCacheKeyer::combine(&x, &y);
                self.session.cache_for_analysis(
                    analyzed_at,
                    BivariateCacheKeyer::key(var1, var2),
                    CachedPayload::Pair(analysis.clone()),
                    self.session.ttl().pair_ttl_secs,
                );
                (analysis, false)
            }
        };

        Ok(PairOutcome {
            summary: analysis.summarize(client_x, client_y),
            analysis,
            from_cache,
        })
    }
}
