//! Cache module - TTL store and pair-analysis keys.
//!
//! Keys are prefixed by their family so a whole family can be dropped
//! with one `invalidate_prefix` call on client reset.

mod bivariate;
mod store;

pub use bivariate::{BivariateCacheKeyer, PairPayload};
pub use store::{CacheEntry, CacheKey, CacheScope, CacheStore};
