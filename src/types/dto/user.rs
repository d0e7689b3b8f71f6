use crate::domain::EmploymentStatus;
use crate::types::db::user_profile;
use chrono::{DateTime, Utc};
use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};

/// Employment classification as exposed over the API
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatusDto {
    Staff,
    Guest,
    Other,
}

impl From<EmploymentStatusDto> for EmploymentStatus {
    fn from(value: EmploymentStatusDto) -> Self {
        match value {
            EmploymentStatusDto::Staff => EmploymentStatus::Staff,
            EmploymentStatusDto::Guest => EmploymentStatus::Guest,
            EmploymentStatusDto::Other => EmploymentStatus::Other,
        }
    }
}

impl From<EmploymentStatus> for EmploymentStatusDto {
    fn from(value: EmploymentStatus) -> Self {
        match value {
            EmploymentStatus::Staff => EmploymentStatusDto::Staff,
            EmploymentStatus::Guest => EmploymentStatusDto::Guest,
            EmploymentStatus::Other => EmploymentStatusDto::Other,
        }
    }
}

/// A user-master record; `password_hash` is never included
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub department: String,
    pub employment_status: EmploymentStatusDto,
    pub is_admin: bool,
    pub updated_at: String,
}

impl From<user_profile::Model> for UserResponse {
    fn from(model: user_profile::Model) -> Self {
        Self {
            id: model.id,
            last_name: model.last_name,
            first_name: model.first_name,
            department: model.department,
            employment_status: model.employment_status.into(),
            is_admin: model.is_admin,
            updated_at: DateTime::<Utc>::from_timestamp(model.updated_at, 0)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default(),
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
}

/// Request body for creating a user-master record
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub department: String,
    pub employment_status: EmploymentStatusDto,
    #[oai(default)]
    pub is_admin: bool,
}

/// Request body for a partial user-master update
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub id: String,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub department: Option<String>,
    pub employment_status: Option<EmploymentStatusDto>,
    pub is_admin: Option<bool>,
}

/// Result of the approver lookup
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CheckApproverResponse {
    pub found: bool,
    pub user: Option<UserResponse>,
}

/// One row of the directory sync batch
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct SyncUserRow {
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub department: String,
    pub employment_status: EmploymentStatusDto,
    #[oai(default)]
    pub is_admin: bool,
}

/// Request body for the directory sync batch upsert
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SyncRequest {
    pub users: Vec<SyncUserRow>,
}

/// Counts of what the sync changed
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SyncResponse {
    pub created: u64,
    pub updated: u64,
    pub unchanged: u64,
}
