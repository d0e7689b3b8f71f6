use crate::domain::AccountStatus;
use sea_orm::entity::prelude::*;

/// SeaORM entity for the guest_accounts table.
///
/// The id is the generated guest email and never changes. Records are never
/// physically removed; `Deleted` is a terminal status kept for the audit
/// trail.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "guest_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub department: String,
    pub usage_purpose: String,
    pub approver_id: String,
    pub expiration_date: i64,
    pub status: AccountStatus,
    pub requested_expiration_date: Option<i64>,
    pub last_updated_date: i64,
    pub created_at: i64,
    pub created_by: String,
    pub archived_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
