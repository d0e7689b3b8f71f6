use crate::domain::AccountAction;
use crate::types::db::guest_account;
use chrono::{DateTime, Utc};
use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};

/// One guest to create in an issuance batch
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct GuestSpec {
    pub last_name: String,
    pub first_name: String,
    pub department: String,
    pub usage_purpose: String,
    /// Email of the STAFF user who will approve this account
    pub approver_email: String,
    /// Expiration timestamp (RFC 3339, or YYYY-MM-DD for midnight UTC)
    pub expiration_date: String,
}

/// Request body for issuing a batch of guest accounts
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct IssueRequest {
    pub guests: Vec<GuestSpec>,
}

/// Response listing the generated guest account ids
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct IssueResponse {
    pub created_ids: Vec<String>,
}

/// Request body for a guest's own extension request
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ExtensionRequest {
    /// Requested new expiration (RFC 3339, or YYYY-MM-DD for midnight UTC)
    pub requested_date: String,
}

/// Approver/admin action on an existing account
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AccountActionDto {
    Extend,
    Edit,
    Delegate,
    ApproveExtension,
    Suspend,
    Archive,
    Restore,
}

impl From<AccountActionDto> for AccountAction {
    fn from(value: AccountActionDto) -> Self {
        match value {
            AccountActionDto::Extend => AccountAction::Extend,
            AccountActionDto::Edit => AccountAction::Edit,
            AccountActionDto::Delegate => AccountAction::Delegate,
            AccountActionDto::ApproveExtension => AccountAction::ApproveExtension,
            AccountActionDto::Suspend => AccountAction::Suspend,
            AccountActionDto::Archive => AccountAction::Archive,
            AccountActionDto::Restore => AccountAction::Restore,
        }
    }
}

/// Action-specific payload; only the fields the action needs are read
#[derive(Object, Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountData {
    /// New expiration for EXTEND (RFC 3339 or YYYY-MM-DD)
    pub expiration_date: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub department: Option<String>,
    pub usage_purpose: Option<String>,
    /// New approver email for DELEGATE
    pub new_approver_id: Option<String>,
}

/// Request body for the account update dispatch endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub account_id: String,
    pub action: AccountActionDto,
    #[oai(default)]
    #[serde(default)]
    pub data: UpdateAccountData,
}

/// Acknowledgement for operations without a payload
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

/// A guest account as returned by list/get endpoints
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub department: String,
    pub usage_purpose: String,
    pub approver_id: String,
    pub expiration_date: String,
    pub status: String,
    pub requested_expiration_date: Option<String>,
    pub last_updated_date: String,
    pub created_at: String,
    pub created_by: String,
    pub archived_at: Option<String>,
}

/// Response wrapping a filtered, sorted account list
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ListAccountsResponse {
    pub accounts: Vec<AccountResponse>,
}

fn to_rfc3339(epoch: i64) -> String {
    DateTime::<Utc>::from_timestamp(epoch, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_deserializes_snake_case_actions() {
        let request: UpdateAccountRequest = serde_json::from_str(
            r#"{"account_id": "gst-0001@example.com", "action": "approve_extension"}"#,
        )
        .expect("request should deserialize");
        assert_eq!(request.action, AccountActionDto::ApproveExtension);
        assert!(request.data.expiration_date.is_none());

        let json = serde_json::to_value(&request).expect("request should serialize");
        assert_eq!(json["action"], "approve_extension");
    }
}

impl From<guest_account::Model> for AccountResponse {
    fn from(model: guest_account::Model) -> Self {
        Self {
            id: model.id,
            last_name: model.last_name,
            first_name: model.first_name,
            department: model.department,
            usage_purpose: model.usage_purpose,
            approver_id: model.approver_id,
            expiration_date: to_rfc3339(model.expiration_date),
            status: model.status.as_str().to_string(),
            requested_expiration_date: model.requested_expiration_date.map(to_rfc3339),
            last_updated_date: to_rfc3339(model.last_updated_date),
            created_at: to_rfc3339(model.created_at),
            created_by: model.created_by,
            archived_at: model.archived_at.map(to_rfc3339),
        }
    }
}
