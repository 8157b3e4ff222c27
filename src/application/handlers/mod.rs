//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod dashboard;

pub use dashboard::{
    // Session
    CachedPayload, DashboardError, DashboardSession,
    // Commands
    AnalyzeClientCommand, AnalyzeClientHandler, AnalyzePairCommand, AnalyzePairHandler,
    CheckHealthCommand, CheckHealthHandler, LoadPopulationCommand, LoadPopulationHandler,
    ModifyClientHandler, NewClientHandler, RefreshPairCommand, RefreshPairHandler,
    // Queries
    GetFeatureTableHandler, GetPopulationStatsHandler, GetPopulationStatsQuery,
    // Results
    AnalysisView, PairOutcome, PopulationComparison,
};
