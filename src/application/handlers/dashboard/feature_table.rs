//! GetFeatureTableHandler - Re-renders the results panel of the current analysis.

use std::sync::Arc;

use super::{AnalysisView, DashboardError, DashboardSession};

/// Query handler for the current analysis view.
pub struct GetFeatureTableHandler {
    session: Arc<DashboardSession>,
}

impl GetFeatureTableHandler {
    pub fn new(session: Arc<DashboardSession>) -> Self {
        Self { session }
    }

    pub fn handle(&self) -> Result<AnalysisView, DashboardError> {
        let state = self.session.state();
        let (record, prediction) = state.analysis()?;
        Ok(AnalysisView::build(record, prediction))
    }
}
