use crate::app_data::AppData;
use crate::types::dto::common::HealthResponse;
use chrono::Utc;
use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

/// Health check API reporting database reachability
pub struct HealthApi {
    app_data: Arc<AppData>,
}

impl HealthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for health endpoints
#[derive(Tags)]
enum ApiTags {
    /// Health check endpoints
    Health,
}

#[OpenApi]
impl HealthApi {
    /// Health check endpoint
    ///
    /// Pings the directory and audit databases; reports "degraded" if either
    /// is unreachable
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        let directory_database = self.app_data.connections.directory.ping().await.is_ok();
        let audit_database = self.app_data.connections.audit.ping().await.is_ok();
        let status = if directory_database && audit_database {
            "healthy"
        } else {
            "degraded"
        };

        Json(HealthResponse {
            status: status.to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            directory_database,
            audit_database,
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
