use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a guest account.
///
/// `Pending` exists only as the restore target for accounts whose expiration
/// has already passed; no other transition produces or consumes it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "suspended")]
    Suspended,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "extension_requested")]
    ExtensionRequested,
    #[sea_orm(string_value = "archived")]
    Archived,
    #[sea_orm(string_value = "deleted")]
    Deleted,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Pending => "pending",
            Self::ExtensionRequested => "extension_requested",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Employment classification from the user directory.
///
/// Only `Staff` may issue guest accounts or be designated as an approver.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    #[sea_orm(string_value = "staff")]
    Staff,
    #[sea_orm(string_value = "guest")]
    Guest,
    #[sea_orm(string_value = "other")]
    Other,
}

impl EmploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Guest => "guest",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Approver/admin actions dispatched through the account update endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction {
    Extend,
    Edit,
    Delegate,
    ApproveExtension,
    Suspend,
    Archive,
    Restore,
}

impl AccountAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extend => "extend",
            Self::Edit => "edit",
            Self::Delegate => "delegate",
            Self::ApproveExtension => "approve_extension",
            Self::Suspend => "suspend",
            Self::Archive => "archive",
            Self::Restore => "restore",
        }
    }

    /// Central transition-legality table.
    ///
    /// Extend, edit, and delegate carry no status precondition; every other
    /// action is pinned to the statuses listed here. Anything outside the
    /// table is an invalid-state error at the service layer.
    pub fn allowed_from(&self, status: AccountStatus) -> bool {
        use AccountStatus::*;
        match self {
            Self::Extend | Self::Edit | Self::Delegate => true,
            Self::ApproveExtension => status == ExtensionRequested,
            Self::Suspend => !matches!(status, Suspended | Archived | Deleted),
            Self::Archive => !matches!(status, Archived | Deleted),
            Self::Restore => matches!(status, Suspended | Archived),
        }
    }
}

impl fmt::Display for AccountAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
