use sea_orm::entity::prelude::*;

/// SeaORM entity for the system_action_log table (audit database).
///
/// One immutable row per guest-account lifecycle transition.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "system_action_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub log_type: String,
    pub operator_id: String,
    pub operator_name: String,
    pub target_account_id: Option<String>,
    pub data: String,
    pub timestamp: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
