use crate::errors::InternalError;
use crate::types::db::user_profile::{self, Entity as UserProfile};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder};

/// Repository for user_master records
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetch a single user by email id
    pub async fn get(&self, id: &str) -> Result<Option<user_profile::Model>, InternalError> {
        UserProfile::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_user", e))
    }

    /// All user-master records, ordered by id
    pub async fn list_all(&self) -> Result<Vec<user_profile::Model>, InternalError> {
        UserProfile::find()
            .order_by_asc(user_profile::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    /// Insert a new user record; the caller must have checked for duplicates
    pub async fn insert(
        &self,
        user: user_profile::ActiveModel,
    ) -> Result<user_profile::Model, InternalError> {
        user.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_user", e))
    }

    /// Persist a partial update prepared by the caller
    pub async fn save(
        &self,
        user: user_profile::ActiveModel,
    ) -> Result<user_profile::Model, InternalError> {
        user.update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_user", e))
    }

    /// Hard-delete a user record
    pub async fn delete(&self, user: user_profile::Model) -> Result<(), InternalError> {
        user.delete(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;
        Ok(())
    }
}
