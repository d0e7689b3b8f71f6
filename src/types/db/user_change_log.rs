use sea_orm::entity::prelude::*;

/// SeaORM entity for the user_change_log table (audit database).
///
/// One immutable row per user_master mutation, carrying the before/after
/// snapshots and the names of the fields that changed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_change_log")]
pub struct Model {
    #[sea_orm(primary_key)]
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
