use crate::errors::AccountError;
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

/// Account lifecycle error types as API responses
#[derive(ApiResponse, Debug)]
pub enum AccountApiError {
    /// No resolvable principal on the request
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorResponse>),

    /// Authenticated but lacking the required role or ownership
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Target account or referenced user does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Field validation or 3-month cap failure
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// The requested action is illegal from the current status
    #[oai(status = 409)]
    InvalidState(Json<ErrorResponse>),

    /// Unexpected store or logging failure
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AccountApiError {
    fn response(error: &str, message: String, status_code: u16) -> ErrorResponse {
        ErrorResponse {
            error: error.to_string(),
            message,
            status_code,
        }
    }

    pub fn unauthenticated() -> Self {
        AccountApiError::Unauthenticated(Json(Self::response(
            "unauthenticated",
            "No authenticated principal".to_string(),
            401,
        )))
    }

    pub fn forbidden(message: String) -> Self {
        AccountApiError::Forbidden(Json(Self::response("forbidden", message, 403)))
    }

    pub fn not_found(message: String) -> Self {
        AccountApiError::NotFound(Json(Self::response("not_found", message, 404)))
    }

    pub fn validation_error(message: String) -> Self {
        AccountApiError::BadRequest(Json(Self::response("validation_error", message, 400)))
    }

    pub fn limit_exceeded(message: String) -> Self {
        AccountApiError::BadRequest(Json(Self::response("limit_exceeded", message, 400)))
    }

    pub fn invalid_state(message: String) -> Self {
        AccountApiError::InvalidState(Json(Self::response("invalid_state", message, 409)))
    }

    pub fn internal_error(message: String) -> Self {
        AccountApiError::InternalError(Json(Self::response("internal_error", message, 500)))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AccountApiError::Unauthenticated(json) => json.0.message.clone(),
            AccountApiError::Forbidden(json) => json.0.message.clone(),
            AccountApiError::NotFound(json) => json.0.message.clone(),
            AccountApiError::BadRequest(json) => json.0.message.clone(),
            AccountApiError::InvalidState(json) => json.0.message.clone(),
            AccountApiError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<AccountError> for AccountApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Unauthenticated => Self::unauthenticated(),
            AccountError::Forbidden(message) => Self::forbidden(message),
            AccountError::NotFound(message) => Self::not_found(message),
            AccountError::Validation { .. } => Self::validation_error(err.to_string()),
            AccountError::LimitExceeded { message } => Self::limit_exceeded(message),
            AccountError::InvalidState { .. } => Self::invalid_state(err.to_string()),
            AccountError::Conflict => {
                // Retry exhaustion surfaces as a generic internal failure
                Self::internal_error("Internal server error".to_string())
            }
            AccountError::Internal(internal) => {
                tracing::error!("Internal error: {internal}");
                Self::internal_error("Internal server error".to_string())
            }
        }
    }
}

impl fmt::Display for AccountApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
