use crate::errors::AccountError;
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

/// User-master administration and audit-read error types as API responses
#[derive(ApiResponse, Debug)]
pub enum AdminApiError {
    /// No resolvable principal on the request
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorResponse>),

    /// Admin role required, or self-deletion attempted
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Target user does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Field validation failure or duplicate id
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Unexpected store or logging failure
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AdminApiError {
    fn response(error: &str, message: String, status_code: u16) -> ErrorResponse {
        ErrorResponse {
            error: error.to_string(),
            message,
            status_code,
        }
    }

    pub fn unauthenticated() -> Self {
        AdminApiError::Unauthenticated(Json(Self::response(
            "unauthenticated",
            "No authenticated principal".to_string(),
            401,
        )))
    }

    pub fn forbidden(message: String) -> Self {
        AdminApiError::Forbidden(Json(Self::response("forbidden", message, 403)))
    }

    pub fn not_found(message: String) -> Self {
        AdminApiError::NotFound(Json(Self::response("not_found", message, 404)))
    }

    pub fn validation_error(message: String) -> Self {
        AdminApiError::BadRequest(Json(Self::response("validation_error", message, 400)))
    }

    pub fn internal_error(message: String) -> Self {
        AdminApiError::InternalError(Json(Self::response("internal_error", message, 500)))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AdminApiError::Unauthenticated(json) => json.0.message.clone(),
            AdminApiError::Forbidden(json) => json.0.message.clone(),
            AdminApiError::NotFound(json) => json.0.message.clone(),
            AdminApiError::BadRequest(json) => json.0.message.clone(),
            AdminApiError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<AccountError> for AdminApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Unauthenticated => Self::unauthenticated(),
            AccountError::Forbidden(message) => Self::forbidden(message),
            AccountError::NotFound(message) => Self::not_found(message),
            AccountError::Validation { .. }
            | AccountError::LimitExceeded { .. }
            | AccountError::InvalidState { .. } => Self::validation_error(err.to_string()),
            AccountError::Conflict => Self::internal_error("Internal server error".to_string()),
            AccountError::Internal(internal) => {
                tracing::error!("Internal error: {internal}");
                Self::internal_error("Internal server error".to_string())
            }
        }
    }
}

impl fmt::Display for AdminApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
