// Test utilities shared across unit tests
// Only compiled when running tests

use crate::app_data::AppData;
use crate::config::{DatabaseConnections, Settings};
use crate::domain::EmploymentStatus;
use crate::types::db::user_profile;
use crate::types::internal::Principal;
use chrono::Utc;
use migration::{AuditMigrator, DirectoryMigrator, MigratorTrait};
use sea_orm::{Database, Set};
use std::sync::Arc;

/// In-memory databases wired into an AppData with test settings.
///
/// Every call creates fresh databases, so tests are isolated.
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

    let settings = test_settings();
    Arc::new(AppData::init(DatabaseConnections { directory, audit }, settings))
}

pub fn test_settings() -> Settings {
    Settings {
        database_url: "sqlite::memory:".to_string(),
        audit_database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        guest_email_domain: "ogw3.com".to_string(),
    }
}

/// Insert a user_master record and return a Principal for it
pub async fn seed_user(
    app_data: &Arc<AppData>,
    email: &str,
    employment_status: EmploymentStatus,
    is_admin: bool,
) -> Principal {
    let user = user_profile::ActiveModel {
        id: Set(email.to_string()),
        last_name: Set("Test".to_string()),
        first_name: Set("User".to_string()),
        department: Set("Engineering".to_string()),
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

/// A Principal with no directory profile, as guests have
pub fn guest_principal(email: &str) -> Principal {
    Principal::new(email.to_string(), None)
}
