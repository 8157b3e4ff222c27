//! Session-specific error types.

use thiserror::Error;

use super::SessionPhase;
use crate::domain::foundation::{ErrorCode, ValidationError};

/// Errors from session state transitions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// A prediction request is already in flight.
    #[error("An analysis is already in progress")]
    SubmissionInProgress,

    #[error("Cannot go from {from} to {to}")]
    InvalidTransition { from: SessionPhase, to: SessionPhase },

    /// The operation needs an analyzed client.
    #[error("No client has been analyzed yet")]
    NotAnalyzed,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl SessionError {
    pub fn invalid_transition(from: SessionPhase, to: SessionPhase) -> Self {
        SessionError::InvalidTransition { from, to }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::SubmissionInProgress => ErrorCode::SubmissionInProgress,
            SessionError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            SessionError::NotAnalyzed => ErrorCode::NotAnalyzed,
            SessionError::Validation(err) => err.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_per_variant() {
        assert_eq!(SessionError::SubmissionInProgress.code(), ErrorCode::SubmissionInProgress);
        assert_eq!(
            SessionError::invalid_transition(SessionPhase::Idle, SessionPhase::Analyzed).code(),
            ErrorCode::InvalidStateTransition
        );
        assert_eq!(
            SessionError::from(ValidationError::empty_field("AMT_ANNUITY")).code(),
            ErrorCode::EmptyField
        );
    }

    #[test]
    fn invalid_transition_message_names_phases() {
        let err = SessionError::invalid_transition(SessionPhase::Analyzed, SessionPhase::Submitting);
        assert_eq!(err.to_string(), "Cannot go from Analyzed to Submitting");
    }
}
