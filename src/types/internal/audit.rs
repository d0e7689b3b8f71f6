use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Log types for guest-account lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemLogType {
    Issue,
    Extend,
    Delegate,
    ExtensionRequest,
    ApproveExtension,
    Edit,
    Suspend,
    Archive,
    Restore,
    SweepDelete,
}

impl SystemLogType {
    /// String representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::Extend => "extend",
            Self::Delegate => "delegate",
            Self::ExtensionRequest => "extension_request",
            Self::ApproveExtension => "approve_extension",
            Self::Edit => "edit",
            Self::Suspend => "suspend",
            Self::Archive => "archive",
            Self::Restore => "restore",
            Self::SweepDelete => "sweep_delete",
        }
    }
}

impl fmt::Display for SystemLogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A lifecycle audit event, before serialization into system_action_log.
///
/// `data` is ordered so serialized payloads are stable across runs.
#[derive(Debug, Clone)]
pub struct SystemActionEvent {
    pub log_type: SystemLogType,
    pub operator_id: String,
    pub operator_name: String,
    pub target_account_id: Option<String>,
    pub data: BTreeMap<String, Value>,
}

impl SystemActionEvent {
    pub fn new(log_type: SystemLogType, operator_id: &str, operator_name: &str) -> Self {
        Self {
            log_type,
            operator_id: operator_id.to_string(),
            operator_name: operator_name.to_string(),
            target_account_id: None,
            data: BTreeMap::new(),
        }
    }

    pub fn target(mut self, account_id: &str) -> Self {
        self.target_account_id = Some(account_id.to_string());
        self
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}

/// Mutation kinds recorded in user_change_log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserChangeAction {
    Create,
    Update,
    Delete,
}

impl UserChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for UserChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-master change event, before serialization into user_change_log.
#[derive(Debug, Clone)]
pub struct UserChangeEvent {
    pub action: UserChangeAction,
    pub target_user_id: String,
    pub operator_id: String,
    pub operator_name: String,
    pub old_data: Option<Value>,
    pub new_data: Option<Value>,
    pub changed_fields: Vec<String>,
}
