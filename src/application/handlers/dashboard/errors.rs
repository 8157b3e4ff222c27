//! Errors returned by dashboard handlers.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::session::SessionError;
use crate::ports::ApiError;

/// Failure of one dashboard action.
///
/// Every variant is recoverable except a failed health check, which the
/// caller treats as fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DashboardError {
    /// Short message shown next to the action that failed.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Api(err) => err.user_message(),
            DashboardError::Session(err) => err.to_string(),
            DashboardError::Validation(err) => format!("Invalid client data: {}", err),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DashboardError::Api(err) => err.code(),
            DashboardError::Session(err) => err.code(),
            DashboardError::Validation(ValidationError::EmptyField { .. }) => {
                ErrorCode::MissingClientValue
            }
            DashboardError::Validation(err) => err.code(),
        }
    }
}
