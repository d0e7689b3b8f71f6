// Common test utilities for integration tests

use chrono::Utc;
use guestdesk_backend::config::{DatabaseConnections, Settings};
use guestdesk_backend::domain::EmploymentStatus;
use guestdesk_backend::types::db::user_profile;
use guestdesk_backend::types::internal::Principal;
use guestdesk_backend::AppData;
use migration::{AuditMigrator, DirectoryMigrator, MigratorTrait};
use sea_orm::{Database, Set};
use std::sync::Arc;

/// Creates in-memory directory and audit databases with migrations applied,
/// wired into an AppData
pub async fn setup_app_data() -> Arc<AppData> {
    let directory = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test directory database");
    DirectoryMigrator::up(&directory, None)
        .await
        .expect("Failed to run directory migrations");

    let audit = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test audit database");
    AuditMigrator::up(&audit, None)
        .await
        .expect("Failed to run audit migrations");

    let settings = Settings {
        database_url: "sqlite::memory:".to_string(),
        audit_database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        guest_email_domain: "ogw3.com".to_string(),
    };

    Arc::new(AppData::init(DatabaseConnections { directory, audit }, settings))
}

/// Inserts a user_master record and returns a Principal for it
pub async fn seed_user(
    app_data: &Arc<AppData>,
    email: &str,
    employment_status: EmploymentStatus,
    is_admin: bool,
) -> Principal {
    let user = user_profile::ActiveModel {
        id: Set(email.to_string()),
        last_name: Set("試験".to_string()),
        first_name: Set("担当".to_string()),
        department: Set("情報システム部".to_string()),
        employment_status: Set(employment_status),
        is_admin: Set(is_admin),
        password_hash: Set(None),
        updated_at: Set(Utc::now().timestamp()),
    };
    let created = app_data
        .user_store
        .insert(user)
        .await
        .expect("Failed to seed test user");

    Principal::new(email.to_string(), Some(created))
}
