//! Client module - the applicant record and its API conversions.
//!
//! - `Feature` - the 10 canonical variables and their static metadata
//! - `ClientRecord` - UI-native form values
//! - `ApiPayload` - API-native values sent to the scoring service
//! - `ClientRecordCodec` - the single conversion table between the two

mod codec;
mod feature;
mod payload;
mod record;
mod value;

pub use codec::{ClientRecordCodec, FeatureConverter};
pub use feature::{Feature, FeatureFamily, FEATURE_COUNT};
pub use payload::ApiPayload;
pub use record::{ClientRecord, Gender, DAYS_PER_YEAR};
pub use value::FeatureValue;
