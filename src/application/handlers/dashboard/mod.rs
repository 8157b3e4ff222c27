//! Dashboard handlers.
//!
//! One [`DashboardSession`] is shared by every handler of an analyst
//! session. Commands drive the session state machine; queries read the
//! current analysis and the cached population data.

mod analyze_client;
mod analyze_pair;
mod check_health;
mod errors;
mod feature_table;
mod load_population;
mod modify_client;
mod new_client;
mod population_stats;
mod refresh_pair;
mod session;
mod view;

pub use analyze_client::{AnalyzeClientCommand, AnalyzeClientHandler};
pub use analyze_pair::{AnalyzePairCommand, AnalyzePairHandler, PairOutcome};
pub use check_health::{CheckHealthCommand, CheckHealthHandler};
pub use errors::DashboardError;
pub use feature_table::GetFeatureTableHandler;
pub use load_population::{LoadPopulationCommand, LoadPopulationHandler, PopulationComparison};
pub use modify_client::ModifyClientHandler;
pub use new_client::NewClientHandler;
pub use population_stats::{GetPopulationStatsHandler, GetPopulationStatsQuery};
pub use refresh_pair::{RefreshPairCommand, RefreshPairHandler};
pub use session::{CachedPayload, DashboardSession};
pub use view::AnalysisView;
