//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates the session state machine, the cache and the
//! scoring API port. Commands change the session; queries read it.

pub mod handlers;

pub use handlers::{
    AnalysisView, AnalyzeClientCommand, AnalyzeClientHandler, AnalyzePairCommand,
    AnalyzePairHandler, CheckHealthCommand, CheckHealthHandler, DashboardError, DashboardSession,
    GetFeatureTableHandler, GetPopulationStatsHandler, GetPopulationStatsQuery,
    LoadPopulationCommand, LoadPopulationHandler, ModifyClientHandler, NewClientHandler,
    PairOutcome, PopulationComparison, RefreshPairCommand, RefreshPairHandler,
};
