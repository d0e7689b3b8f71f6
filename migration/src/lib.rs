pub use sea_orm_migration::prelude::*;

mod m20250810_000001_create_directory_schema;
mod m20250810_000002_create_audit_schema;

pub struct DirectoryMigrator;

#[async_trait::async_trait]
impl MigratorTrait for DirectoryMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(
            m20250810_000001_create_directory_schema::Migration,
        )]
    }
}

pub struct AuditMigrator;

#[async_trait::async_trait]
impl MigratorTrait for AuditMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250810_000002_create_audit_schema::Migration)]
    }
}
