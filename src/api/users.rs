use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::api::AdminApiError;
use crate::services::{DirectorySync, UserAdminService};
use crate::stores::UserStore;
use crate::types::dto::account::AckResponse;
use crate::types::dto::user::{
    CheckApproverResponse, CreateUserRequest, ListUsersResponse, SyncRequest, SyncResponse,
    UpdateUserRequest, UserResponse,
};
use poem::Request;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

/// User-master administration API endpoints
pub struct UsersApi {
    user_admin: Arc<UserAdminService>,
    directory_sync: Arc<DirectorySync>,
    user_store: Arc<UserStore>,
}

impl UsersApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_admin: Arc::new(UserAdminService::new(app_data.clone())),
            directory_sync: Arc::new(DirectorySync::new(app_data.clone())),
            user_store: app_data.user_store.clone(),
        }
    }
}

/// API tags for user-master endpoints
#[derive(Tags)]
enum UserTags {
    /// User directory management
    Users,
}

#[OpenApi(prefix_path = "/users")]
impl UsersApi {
    /// List all directory records (admin only)
    #[oai(path = "/", method = "get", tag = "UserTags::Users")]
    async fn list(&self, req: &Request) -> Result<Json<ListUsersResponse>, AdminApiError> {
        let actor = helpers::resolve_principal(req, &self.user_store).await?;
        let users = self.user_admin.list_users(&actor).await?;
        Ok(Json(ListUsersResponse {
            users: users.into_iter().map(UserResponse::from).collect(),
        }))
    }

    /// Create a directory record (admin only)
    #[oai(path = "/", method = "post", tag = "UserTags::Users")]
    async fn create(
        &self,
        req: &Request,
        body: Json<CreateUserRequest>,
    ) -> Result<Json<UserResponse>, AdminApiError> {
        let actor = helpers::resolve_principal(req, &self.user_store).await?;
        let created = self.user_admin.create_user(&actor, &body.0).await?;
        Ok(Json(created.into()))
    }

    /// Apply a partial update to a directory record (admin only)
    #[oai(path = "/", method = "put", tag = "UserTags::Users")]
    async fn update(
        &self,
        req: &Request,
        body: Json<UpdateUserRequest>,
    ) -> Result<Json<UserResponse>, AdminApiError> {
        let actor = helpers::resolve_principal(req, &self.user_store).await?;
        let updated = self.user_admin.update_user(&actor, &body.0).await?;
        Ok(Json(updated.into()))
    }

    /// Delete a directory record (admin only, self-delete forbidden)
    #[oai(path = "/", method = "delete", tag = "UserTags::Users")]
    async fn delete(
        &self,
        req: &Request,
        id: Query<String>,
    ) -> Result<Json<AckResponse>, AdminApiError> {
        let actor = helpers::resolve_principal(req, &self.user_store).await?;
        self.user_admin.delete_user(&actor, &id.0).await?;
        Ok(Json(AckResponse { success: true }))
    }

    /// Check whether an email resolves to a STAFF profile (staff or admin only)
    #[oai(path = "/check", method = "get", tag = "UserTags::Users")]
    async fn check(
        &self,
        req: &Request,
        email: Query<String>,
    ) -> Result<Json<CheckApproverResponse>, AdminApiError> {
        let actor = helpers::resolve_principal(req, &self.user_store).await?;
        let user = self.user_admin.check_approver(&actor, &email.0).await?;
        Ok(Json(CheckApproverResponse {
            found: user.is_some(),
            user: user.map(UserResponse::from),
        }))
    }

    /// Batch upsert of directory rows from the upstream source (admin only)
    #[oai(path = "/sync", method = "post", tag = "UserTags::Users")]
    async fn sync(
        &self,
        req: &Request,
        body: Json<SyncRequest>,
    ) -> Result<Json<SyncResponse>, AdminApiError> {
        let actor = helpers::resolve_principal(req, &self.user_store).await?;
        let result = self.directory_sync.sync(&actor, &body.users).await?;
        Ok(Json(result))
    }
}
