use sea_orm::entity::prelude::*;

/// SeaORM entity for the sequence_counters table.
///
/// One row per named counter; `value` is the last assigned number. The row is
/// only ever read and written inside the issuance transaction.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sequence_counters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub value: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
