use crate::domain::EmploymentStatus;
use sea_orm::entity::prelude::*;

/// SeaORM entity for the user_master table.
///
/// `password_hash` is owned by the external identity provider; it is stored
/// when set but never exposed through the API or the directory sync.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_master")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub department: String,
    pub employment_status: EmploymentStatus,
    pub is_admin: bool,
    pub password_hash: Option<String>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Display name used as operator_name in audit entries.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }

    pub fn is_staff(&self) -> bool {
        self.employment_status == EmploymentStatus::Staff
    }
}
