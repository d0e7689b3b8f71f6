use crate::config::Settings;
use crate::errors::InternalError;
use migration::{AuditMigrator, DirectoryMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

/// Connections to the two databases the service uses: the directory database
/// (user_master, guest_accounts, sequence_counters) and the audit database
/// (system_action_log, user_change_log).
pub struct DatabaseConnections {
    pub directory: DatabaseConnection,
    pub audit: DatabaseConnection,
}

impl DatabaseConnections {
    /// Connect to both databases. Does not run migrations; call `migrate()`
    /// separately.
    pub async fn init(settings: &Settings) -> Result<Self, InternalError> {
        let directory = Database::connect(&settings.database_url)
            .await
            .map_err(|e| InternalError::database("connect_directory_database", e))?;
        tracing::debug!("Connected to directory database: {}", settings.database_url);

        let audit = Database::connect(&settings.audit_database_url)
            .await
            .map_err(|e| InternalError::database("connect_audit_database", e))?;
        tracing::debug!("Connected to audit database: {}", settings.audit_database_url);

        Ok(Self { directory, audit })
    }

    /// Run all pending migrations on both databases
    pub async fn migrate(&self) -> Result<(), InternalError> {
        DirectoryMigrator::up(&self.directory, None)
            .await
            .map_err(|e| InternalError::database("run_directory_migrations", e))?;
        AuditMigrator::up(&self.audit, None)
            .await
            .map_err(|e| InternalError::database("run_audit_migrations", e))?;
        Ok(())
    }
}
