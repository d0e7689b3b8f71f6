use crate::domain::validation::FieldError;
use crate::domain::{AccountAction, AccountStatus};
use crate::errors::InternalError;
use thiserror::Error;

/// Domain error for lifecycle and directory operations
///
/// Authorization failures (`Unauthenticated`, `Forbidden`) are distinct from
/// business-rule failures (`Validation`, `LimitExceeded`, `InvalidState`) so
/// callers can render them differently. `Conflict` means the issuance
/// transaction exhausted its retries.
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("No authenticated principal")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("{message}")]
    LimitExceeded { message: String },

    #[error("Action '{action}' is not allowed while status is '{status}'")]
    InvalidState {
        status: AccountStatus,
        action: AccountAction,
    },

    #[error("Write conflict: transaction retries exhausted")]
    Conflict,

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl AccountError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        AccountError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AccountError::NotFound(message.into())
    }

    pub fn limit_exceeded(message: impl Into<String>) -> Self {
        AccountError::LimitExceeded {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AccountError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<FieldError> for AccountError {
    fn from(err: FieldError) -> Self {
        AccountError::Validation {
            field: err.field,
            message: err.message,
        }
    }
}
