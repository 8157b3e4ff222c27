//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Checks `actual` against an inclusive range.
    pub fn check_range(
        field: impl Into<String>,
        min: f64,
        max: f64,
        actual: f64,
    ) -> Result<(), ValidationError> {
        if actual.is_finite() && actual >= min && actual <= max {
            Ok(())
        } else {
            Err(Self::out_of_range(field, min, max, actual))
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,
    MissingClientValue,

    // State errors
    InvalidStateTransition,
    SubmissionInProgress,
    NotAnalyzed,

    // Collaborator errors
    Timeout,
    ConnectionFailure,
    HttpStatus,
    MalformedResponse,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::MissingClientValue => "MISSING_CLIENT_VALUE",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::SubmissionInProgress => "SUBMISSION_IN_PROGRESS",
            ErrorCode::NotAnalyzed => "NOT_ANALYZED",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::ConnectionFailure => "CONNECTION_FAILURE",
            ErrorCode::HttpStatus => "HTTP_STATUS",
            ErrorCode::MalformedResponse => "MALFORMED_RESPONSE",
        };
        write!(f, "{}", s)
    }
}

impl ValidationError {
    /// Returns the error code for this validation failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        }
    }
}
