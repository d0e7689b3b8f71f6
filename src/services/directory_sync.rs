use crate::audit::AuditLogger;
use crate::domain::validation::validate_user_profile_fields;
use crate::errors::AccountError;
use crate::services::user_admin::profile_json;
use crate::stores::UserStore;
use crate::types::db::user_profile;
use crate::types::dto::user::{SyncResponse, SyncUserRow};
use crate::types::internal::audit::{UserChangeAction, UserChangeEvent};
use crate::types::internal::Principal;
use chrono::Utc;
use sea_orm::{IntoActiveModel, Set};
use std::sync::Arc;

/// Batch upsert of directory rows from the upstream HR source.
///
/// Missing profiles are created, changed ones updated field by field, and
/// rows identical to the stored record are counted as unchanged. Fields the
/// sync does not own, `password_hash` in particular, are never touched.
pub struct DirectorySync {
    user_store: Arc<UserStore>,
    audit_logger: Arc<AuditLogger>,
}

impl DirectorySync {
    /// Create a DirectorySync from AppData
    pub fn new(app_data: Arc<crate::app_data::AppData>) -> Self {
        Self {
            user_store: app_data.user_store.clone(),
            audit_logger: app_data.audit_logger.clone(),
        }
    }

    /// Upsert the batch and report what happened. Admin only.
    ///
    /// Rows are validated up front so a bad row fails the whole batch before
    /// any write.
    pub async fn sync(
        &self,
        actor: &Principal,
        rows: &[SyncUserRow],
    ) -> Result<SyncResponse, AccountError> {
        if !actor.is_admin() {
            return Err(AccountError::forbidden("Admin role required"));
        }

        for row in rows {
            validate_user_profile_fields(
                Some(&row.id),
                Some(&row.last_name),
                Some(&row.first_name),
                Some(&row.department),
            )?;
        }

        let mut result = SyncResponse {
            created: 0,
            updated: 0,
            unchanged: 0,
        };

        for row in rows {
            match self.user_store.get(&row.id).await? {
                None => {
                    self.create_from_row(actor, row).await?;
                    result.created += 1;
                }
                Some(existing) => {
                    let changed = changed_fields(&existing, row);
                    if changed.is_empty() {
                        result.unchanged += 1;
                    } else {
                        self.update_from_row(actor, existing, row, changed).await?;
                        result.updated += 1;
                    }
                }
            }
        }

        tracing::info!(
            created = result.created,
            updated = result.updated,
            unchanged = result.unchanged,
            synced_by = %actor.email,
            "Directory sync completed"
        );

        Ok(result)
    }

    async fn create_from_row(
        &self,
        actor: &Principal,
        row: &SyncUserRow,
    ) -> Result<(), AccountError> {
        let user = user_profile::ActiveModel {
            id: Set(row.id.clone()),
            last_name: Set(row.last_name.clone()),
            first_name: Set(row.first_name.clone()),
            department: Set(row.department.clone()),
            employment_status: Set(row.employment_status.into()),
            is_admin: Set(row.is_admin),
            password_hash: Set(None),
            updated_at: Set(Utc::now().timestamp()),
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
        Ok(())
    }

    async fn update_from_row(
        &self,
        actor: &Principal,
        existing: user_profile::Model,
        row: &SyncUserRow,
        changed: Vec<String>,
    ) -> Result<(), AccountError> {
        let old_data = profile_json(&existing);
        let mut active = existing.into_active_model();
        active.last_name = Set(row.last_name.clone());
        active.first_name = Set(row.first_name.clone());
        active.department = Set(row.department.clone());
        active.employment_status = Set(row.employment_status.into());
        active.is_admin = Set(row.is_admin);
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
        Ok(())
    }
}

/// Which syncable fields differ between the stored record and the row.
fn changed_fields(existing: &user_profile::Model, row: &SyncUserRow) -> Vec<String> {
    let mut changed = Vec::new();
    if existing.last_name != row.last_name {
        changed.push("last_name".to_string());
    }
    if existing.first_name != row.first_name {
        changed.push("first_name".to_string());
    }
    if existing.department != row.department {
        changed.push("department".to_string());
    }
    if existing.employment_status != row.employment_status.into() {
        changed.push("employment_status".to_string());
    }
    if existing.is_admin != row.is_admin {
        changed.push("is_admin".to_string());
    }
    changed
}
