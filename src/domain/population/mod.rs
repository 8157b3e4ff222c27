//! Population module - samples the client is compared against.

mod distribution;
mod pair;
mod statistics;

pub use distribution::{PopulationDistribution, PopulationStats};
pub use pair::{PairAnalysis, PairSummary};
pub use statistics::{pearson_correlation, percentile_of};
