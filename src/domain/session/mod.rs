//! Session module - the analyst's progress through one analysis.
//!
//! `Idle -> Submitting -> Analyzed -> Idle`, guarded against duplicate
//! submissions.

mod errors;
mod machine;
mod phase;

pub use errors::SessionError;
pub use machine::SessionStateMachine;
pub use phase::SessionPhase;
