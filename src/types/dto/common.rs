use poem_openapi::Object;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// "healthy" when both databases answer a ping, "degraded" otherwise
    pub status: String,

    /// Service package name
    pub service: String,

    /// Service package version
    pub version: String,

    /// Whether the directory database answered a ping
    pub directory_database: bool,

    /// Whether the audit database answered a ping
    pub audit_database: bool,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Standardized error response model
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error type or category
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}
