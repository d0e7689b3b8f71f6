use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};

use crate::errors::internal::AuditError;
use crate::errors::InternalError;
use crate::types::db::{system_action_log, user_change_log};
use crate::types::internal::audit::{SystemActionEvent, UserChangeAction, UserChangeEvent};

/// Repository for audit log storage in the audit database
pub struct AuditStore {
    db: DatabaseConnection,
}

impl AuditStore {
    /// Create a new AuditStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Write a lifecycle event to system_action_log
    ///
    /// Serializes the event payload to JSON and inserts the row. Rows are
    /// immutable once written.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if serialization or the database insert fails
    pub async fn write_system_event(&self, event: SystemActionEvent) -> Result<(), InternalError> {
        let data_json = serde_json::to_string(&event.data).map_err(|e| {
            AuditError::LogWriteFailed(format!("Failed to serialize audit data: {}", e))
        })?;

        let row = system_action_log::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            log_type: Set(event.log_type.to_string()),
            operator_id: Set(event.operator_id),
            operator_name: Set(event.operator_name),
            target_account_id: Set(event.target_account_id),
            data: Set(data_json),
            timestamp: Set(Utc::now().to_rfc3339()),
        };

        row.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("write_system_event", e))?;

        Ok(())
    }

    /// Write a user-master change to user_change_log
    pub async fn write_user_change(&self, event: UserChangeEvent) -> Result<(), InternalError> {
        let old_data = event
            .old_data
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| {
                AuditError::LogWriteFailed(format!("Failed to serialize old_data: {}", e))
            })?;
        let new_data = event
            .new_data
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| {
                AuditError::LogWriteFailed(format!("Failed to serialize new_data: {}", e))
            })?;
        let changed_fields = if event.changed_fields.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&event.changed_fields).map_err(|e| {
                AuditError::LogWriteFailed(format!("Failed to serialize changed_fields: {}", e))
            })?)
        };

        let description = match event.action {
            UserChangeAction::Create => "User created".to_string(),
            UserChangeAction::Delete => "User deleted".to_string(),
            UserChangeAction::Update => {
                if event.changed_fields.is_empty() {
                    "User updated".to_string()
                } else {
                    format!("Updated fields: {}", event.changed_fields.join(", "))
                }
            }
        };

        let row = user_change_log::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            action: Set(event.action.to_string()),
            target_user_id: Set(event.target_user_id),
            operator_id: Set(event.operator_id),
            operator_name: Set(event.operator_name),
            old_data: Set(old_data),
            new_data: Set(new_data),
            changed_fields: Set(changed_fields),
            description: Set(Some(description)),
            timestamp: Set(Utc::now().to_rfc3339()),
        };

        row.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("write_user_change", e))?;

        Ok(())
    }

    /// Most recent lifecycle log entries, newest first
    pub async fn list_system_events(
        &self,
        limit: u64,
    ) -> Result<Vec<system_action_log::Model>, InternalError> {
        system_action_log::Entity::find()
            .order_by_desc(system_action_log::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_system_events", e))
    }

    /// Most recent user-master change entries, newest first
    pub async fn list_user_changes(
        &self,
        limit: u64,
    ) -> Result<Vec<user_change_log::Model>, InternalError> {
        user_change_log::Entity::find()
            .order_by_desc(user_change_log::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_user_changes", e))
    }
}
