use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::api::AdminApiError;
use crate::errors::AccountError;
use crate::stores::{AuditStore, UserStore};
use crate::types::dto::logs::{
    SystemLogEntry, SystemLogsResponse, UserChangeLogEntry, UserChangeLogsResponse,
};
use crate::types::internal::Principal;
use poem::Request;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

/// Most entries a single log read returns
const MAX_LOG_LIMIT: u64 = 500;
const DEFAULT_LOG_LIMIT: u64 = 100;

/// Audit log read API endpoints (admin only)
pub struct LogsApi {
    audit_store: Arc<AuditStore>,
    user_store: Arc<UserStore>,
}

impl LogsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            audit_store: app_data.audit_store.clone(),
            user_store: app_data.user_store.clone(),
        }
    }
}

/// API tags for audit log endpoints
#[derive(Tags)]
enum LogTags {
    /// Audit log reads
    Logs,
}

#[OpenApi(prefix_path = "/logs")]
impl LogsApi {
    /// Most recent guest-account lifecycle log entries
    #[oai(path = "/system", method = "get", tag = "LogTags::Logs")]
    async fn system_logs(
        &self,
        req: &Request,
        limit: Query<Option<u64>>,
    ) -> Result<Json<SystemLogsResponse>, AdminApiError> {
        let actor = helpers::resolve_principal(req, &self.user_store).await?;
        require_admin(&actor)?;

        let limit = effective_limit(limit.0);
        let logs = self.audit_store.list_system_events(limit).await.map_err(AccountError::from)?;
        Ok(Json(SystemLogsResponse {
            logs: logs.into_iter().map(SystemLogEntry::from).collect(),
        }))
    }

    /// Most recent user-master change log entries
    #[oai(path = "/users", method = "get", tag = "LogTags::Logs")]
    async fn user_logs(
        &self,
        req: &Request,
        limit: Query<Option<u64>>,
    ) -> Result<Json<UserChangeLogsResponse>, AdminApiError> {
        let actor = helpers::resolve_principal(req, &self.user_store).await?;
        require_admin(&actor)?;

        let limit = effective_limit(limit.0);
        let logs = self.audit_store.list_user_changes(limit).await.map_err(AccountError::from)?;
        Ok(Json(UserChangeLogsResponse {
            logs: logs.into_iter().map(UserChangeLogEntry::from).collect(),
        }))
    }
}

fn require_admin(actor: &Principal) -> Result<(), AdminApiError> {
    if !actor.is_admin() {
        return Err(AdminApiError::forbidden("Admin role required".to_string()));
    }
    Ok(())
}

fn effective_limit(requested: Option<u64>) -> u64 {
    requested.unwrap_or(DEFAULT_LOG_LIMIT).min(MAX_LOG_LIMIT)
}
