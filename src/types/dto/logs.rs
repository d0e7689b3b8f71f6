use crate::types::db::{system_action_log, user_change_log};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// One lifecycle audit entry
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct SystemLogEntry {
    pub id: i64,
    pub log_type: String,
    pub operator_id: String,
    pub operator_name: String,
    pub target_account_id: Option<String>,
    /// Action-specific payload as recorded (JSON)
    pub data: String,
    pub timestamp: String,
}

impl From<system_action_log::Model> for SystemLogEntry {
    fn from(model: system_action_log::Model) -> Self {
        Self {
            id: model.id,
            log_type: model.log_type,
            operator_id: model.operator_id,
            operator_name: model.operator_name,
            target_account_id: model.target_account_id,
            data: model.data,
            timestamp: model.timestamp,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SystemLogsResponse {
    pub logs: Vec<SystemLogEntry>,
}

/// One user-master change entry
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UserChangeLogEntry {
    pub id: i64,
    pub action: String,
    pub target_user_id: String,
    pub operator_id: String,
    pub operator_name: String,
    pub old_data: Option<String>,
    pub new_data: Option<String>,
    pub changed_fields: Option<String>,
    pub description: Option<String>,
    pub timestamp: String,
}

impl From<user_change_log::Model> for UserChangeLogEntry {
    fn from(model: user_change_log::Model) -> Self {
        Self {
            id: model.id,
            action: model.action,
            target_user_id: model.target_user_id,
            operator_id: model.operator_id,
            operator_name: model.operator_name,
            old_data: model.old_data,
            new_data: model.new_data,
            changed_fields: model.changed_fields,
            description: model.description,
            timestamp: model.timestamp,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserChangeLogsResponse {
    pub logs: Vec<UserChangeLogEntry>,
}
