use crate::audit::AuditLogger;
use crate::domain::validation::validate_user_profile_fields;
use crate::errors::AccountError;
use crate::stores::UserStore;
use crate::types::db::user_profile;
use crate::types::dto::user::{CreateUserRequest, UpdateUserRequest};
use crate::types::internal::audit::{UserChangeAction, UserChangeEvent};
use crate::types::internal::Principal;
use chrono::Utc;
use sea_orm::{IntoActiveModel, Set};
use serde_json::json;
use std::sync::Arc;

/// Admin CRUD over the user directory.
///
/// Every mutation requires an admin principal and writes a user_change_log
/// entry carrying the old data, the new data, and the changed field names.
pub struct UserAdminService {
    user_store: Arc<UserStore>,
    audit_logger: Arc<AuditLogger>,
}

impl UserAdminService {
    /// Create a UserAdminService from AppData
    pub fn new(app_data: Arc<crate::app_data::AppData>) -> Self {
        Self {
            user_store: app_data.user_store.clone(),
            audit_logger: app_data.audit_logger.clone(),
        }
    }

    /// All directory records, ordered by id. Admin only.
    pub async fn list_users(
        &self,
        actor: &Principal,
    ) -> Result<Vec<user_profile::Model>, AccountError> {
        require_admin(actor)?;
        Ok(self.user_store.list_all().await?)
    }

    /// Create a directory record. Duplicate ids are rejected. Admin only.
    pub async fn create_user(
        &self,
        actor: &Principal,
        request: &CreateUserRequest,
    ) -> Result<user_profile::Model, AccountError> {
        require_admin(actor)?;
        validate_user_profile_fields(
            Some(&request.id),
            Some(&request.last_name),
            Some(&request.first_name),
            Some(&request.department),
        )?;

        if self.user_store.get(&request.id).await?.is_some() {
            return Err(AccountError::validation(
                "id",
                format!("User already exists: {}", request.id),
            ));
        }

        let now = Utc::now().timestamp();
        let user = user_profile::ActiveModel {
            id: Set(request.id.clone()),
            last_name: Set(request.last_name.clone()),
            first_name: Set(request.first_name.clone()),
            department: Set(request.department.clone()),
            employment_status: Set(request.employment_status.into()),
            is_admin: Set(request.is_admin),
            password_hash: Set(None),
            updated_at: Set(now),
        };
        let created = self.user_store.insert(user).await?;

        self.audit_logger
            .record_user_change(UserChangeEvent {
                action: UserChangeAction::Create,
                target_user_id: created.id.clone(),
                operator_id: actor.email.clone(),
                operator_name: actor.display_name(),
                old_data: None,
                new_data: Some(profile_json(&created)),
                changed_fields: Vec::new(),
            })
            .await;

        tracing::info!(user_id = %created.id, created_by = %actor.email, "User created");
        Ok(created)
    }

    /// Apply a partial update to a directory record. Admin only.
    pub async fn update_user(
        &self,
        actor: &Principal,
        request: &UpdateUserRequest,
    ) -> Result<user_profile::Model, AccountError> {
        require_admin(actor)?;
        validate_user_profile_fields(
            None,
            request.last_name.as_deref(),
            request.first_name.as_deref(),
            request.department.as_deref(),
        )?;

        let existing = self
            .user_store
            .get(&request.id)
            .await?
            .ok_or_else(|| AccountError::not_found(format!("User not found: {}", request.id)))?;

        let old_data = profile_json(&existing);
        let mut changed = Vec::new();
        let mut active = existing.clone().into_active_model();

        if let Some(last_name) = &request.last_name {
            if last_name != &existing.last_name {
                changed.push("last_name".to_string());
            }
            active.last_name = Set(last_name.clone());
        }
        if let Some(first_name) = &request.first_name {
            if first_name != &existing.first_name {
                changed.push("first_name".to_string());
            }
            active.first_name = Set(first_name.clone());
        }
        if let Some(department) = &request.department {
            if department != &existing.department {
                changed.push("department".to_string());
            }
            active.department = Set(department.clone());
        }
        if let Some(status) = request.employment_status {
            let status = status.into();
            if status != existing.employment_status {
                changed.push("employment_status".to_string());
            }
            active.employment_status = Set(status);
        }
        if let Some(is_admin) = request.is_admin {
            if is_admin != existing.is_admin {
                changed.push("is_admin".to_string());
            }
            active.is_admin = Set(is_admin);
        }
        active.updated_at = Set(Utc::now().timestamp());
        let updated = self.user_store.save(active).await?;

        self.audit_logger
            .record_user_change(UserChangeEvent {
                action: UserChangeAction::Update,
                target_user_id: updated.id.clone(),
                operator_id: actor.email.clone(),
                operator_name: actor.display_name(),
                old_data: Some(old_data),
                new_data: Some(profile_json(&updated)),
                changed_fields: changed,
            })
            .await;

        Ok(updated)
    }

    /// Hard-delete a directory record. Self-delete is forbidden. Admin only.
    pub async fn delete_user(&self, actor: &Principal, id: &str) -> Result<(), AccountError> {
        require_admin(actor)?;
        if id == actor.email {
            return Err(AccountError::forbidden("Cannot delete your own account"));
        }

        let existing = self
            .user_store
            .get(id)
            .await?
            .ok_or_else(|| AccountError::not_found(format!("User not found: {id}")))?;

        let old_data = profile_json(&existing);
        let user_id = existing.id.clone();
        self.user_store.delete(existing).await?;

        self.audit_logger
            .record_user_change(UserChangeEvent {
                action: UserChangeAction::Delete,
                target_user_id: user_id.clone(),
                operator_id: actor.email.clone(),
                operator_name: actor.display_name(),
                old_data: Some(old_data),
                new_data: None,
                changed_fields: Vec::new(),
            })
            .await;

        tracing::info!(user_id = %user_id, deleted_by = %actor.email, "User deleted");
        Ok(())
    }

    /// Approver lookup used before issuance and delegation: does this email
    /// belong to a STAFF profile? Only STAFF or admin callers may resolve
    /// directory records this way.
    pub async fn check_approver(
        &self,
        actor: &Principal,
        email: &str,
    ) -> Result<Option<user_profile::Model>, AccountError> {
        if !actor.is_staff() && !actor.is_admin() {
            return Err(AccountError::forbidden("Staff role required"));
        }
        let user = self.user_store.get(email).await?;
        Ok(user.filter(user_profile::Model::is_staff))
    }
}

fn require_admin(actor: &Principal) -> Result<(), AccountError> {
    if !actor.is_admin() {
        return Err(AccountError::forbidden("Admin role required"));
    }
    Ok(())
}

/// Snapshot of a profile for the change log. Excludes `password_hash`.
pub(crate) fn profile_json(user: &user_profile::Model) -> serde_json::Value {
    json!({
        "id": user.id,
        "last_name": user.last_name,
        "first_name": user.first_name,
        "department": user.department,
        "employment_status": user.employment_status.as_str(),
        "is_admin": user.is_admin,
    })
}
