use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::api::AccountApiError;
use crate::services::{LifecycleService, ListScope};
use crate::stores::UserStore;
use crate::types::dto::account::{
    AccountResponse, AckResponse, ExtensionRequest, IssueRequest, IssueResponse,
    ListAccountsResponse, UpdateAccountRequest,
};
use poem::Request;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

/// Guest-account lifecycle API endpoints
pub struct AccountsApi {
    lifecycle: Arc<LifecycleService>,
    user_store: Arc<UserStore>,
}

impl AccountsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            lifecycle: Arc::new(LifecycleService::new(app_data.clone())),
            user_store: app_data.user_store.clone(),
        }
    }
}

/// API tags for account endpoints
#[derive(Tags)]
enum AccountTags {
    /// Guest-account lifecycle
    Accounts,
}

#[OpenApi(prefix_path = "/accounts")]
impl AccountsApi {
    /// Issue a batch of guest accounts (STAFF only)
    #[oai(path = "/issue", method = "post", tag = "AccountTags::Accounts")]
    async fn issue(
        &self,
        req: &Request,
        body: Json<IssueRequest>,
    ) -> Result<Json<IssueResponse>, AccountApiError> {
        let actor = helpers::resolve_principal(req, &self.user_store).await?;
        let created_ids = self.lifecycle.issue(&actor, &body.guests).await?;
        Ok(Json(IssueResponse { created_ids }))
    }

    /// Request an extension for the caller's own guest account
    #[oai(path = "/extension", method = "post", tag = "AccountTags::Accounts")]
    async fn request_extension(
        &self,
        req: &Request,
        body: Json<ExtensionRequest>,
    ) -> Result<Json<AckResponse>, AccountApiError> {
        let actor = helpers::resolve_principal(req, &self.user_store).await?;
        self.lifecycle
            .request_extension(&actor, &body.requested_date)
            .await?;
        Ok(Json(AckResponse { success: true }))
    }

    /// Apply an approver/admin action to an account
    #[oai(path = "/update", method = "post", tag = "AccountTags::Accounts")]
    async fn update(
        &self,
        req: &Request,
        body: Json<UpdateAccountRequest>,
    ) -> Result<Json<AckResponse>, AccountApiError> {
        let actor = helpers::resolve_principal(req, &self.user_store).await?;
        self.lifecycle
            .update_account(&actor, &body.account_id, body.action.into(), &body.data)
            .await?;
        Ok(Json(AckResponse { success: true }))
    }

    /// List accounts; `scope=mine` (default) or `scope=all` (admin only)
    #[oai(path = "/", method = "get", tag = "AccountTags::Accounts")]
    async fn list(
        &self,
        req: &Request,
        scope: Query<Option<String>>,
    ) -> Result<Json<ListAccountsResponse>, AccountApiError> {
        let actor = helpers::resolve_principal(req, &self.user_store).await?;

        let scope = match scope.0.as_deref() {
            None | Some("mine") => ListScope::Mine,
            Some("all") => ListScope::All,
            Some(other) => {
                return Err(AccountApiError::validation_error(format!(
                    "Unknown scope: {other}"
                )))
            }
        };

        let accounts = self.lifecycle.list_accounts(&actor, scope).await?;
        Ok(Json(ListAccountsResponse {
            accounts: accounts.into_iter().map(AccountResponse::from).collect(),
        }))
    }
}
