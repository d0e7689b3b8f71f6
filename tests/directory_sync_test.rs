// Directory sync batch-upsert coverage

mod common;

use common::{seed_user, setup_app_data};
use guestdesk_backend::domain::EmploymentStatus;
use guestdesk_backend::errors::AccountError;
use guestdesk_backend::services::DirectorySync;
use guestdesk_backend::types::db::user_profile;
use guestdesk_backend::types::dto::user::{EmploymentStatusDto, SyncUserRow};
use sea_orm::{IntoActiveModel, Set};

fn row(id: &str, department: &str) -> SyncUserRow {
    SyncUserRow {
        id: id.to_string(),
        last_name: "高橋".to_string(),
        first_name: "次郎".to_string(),
        department: department.to_string(),
        employment_status: EmploymentStatusDto::Staff,
        is_admin: false,
    }
}

#[tokio::test]
async fn sync_requires_admin() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = DirectorySync::new(app_data.clone());

    let err = service
        .sync(&staff, &[row("someone@example.com", "総務部")])
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::Forbidden(_)));
}

#[tokio::test]
async fn sync_reports_created_updated_unchanged() {
    let app_data = setup_app_data().await;
    let admin = seed_user(&app_data, "admin@example.com", EmploymentStatus::Staff, true).await;
    let service = DirectorySync::new(app_data.clone());

    let result = service
        .sync(
            &admin,
            &[row("a@example.com", "総務部"), row("b@example.com", "営業部")],
        )
        .await
        .unwrap();
    assert_eq!((result.created, result.updated, result.unchanged), (2, 0, 0));

    // Second pass: one row changed, one identical
    let result = service
        .sync(
            &admin,
            &[row("a@example.com", "経理部"), row("b@example.com", "営業部")],
        )
        .await
        .unwrap();
    assert_eq!((result.created, result.updated, result.unchanged), (0, 1, 1));

    let user = app_data.user_store.get("a@example.com").await.unwrap().unwrap();
    assert_eq!(user.department, "経理部");
}

#[tokio::test]
async fn sync_never_touches_password_hash() {
    let app_data = setup_app_data().await;
    let admin = seed_user(&app_data, "admin@example.com", EmploymentStatus::Staff, true).await;
    let service = DirectorySync::new(app_data.clone());

    service
        .sync(&admin, &[row("a@example.com", "総務部")])
        .await
        .unwrap();

    // A hash set out of band must survive later syncs
    let user = app_data.user_store.get("a@example.com").await.unwrap().unwrap();
    let mut active: user_profile::ActiveModel = user.into_active_model();
    active.password_hash = Set(Some("external-hash".to_string()));
    app_data.user_store.save(active).await.unwrap();

    service
        .sync(&admin, &[row("a@example.com", "経理部")])
        .await
        .unwrap();

    let user = app_data.user_store.get("a@example.com").await.unwrap().unwrap();
    assert_eq!(user.password_hash.as_deref(), Some("external-hash"));
    assert_eq!(user.department, "経理部");
}

#[tokio::test]
async fn sync_writes_change_log_entries() {
    let app_data = setup_app_data().await;
    let admin = seed_user(&app_data, "admin@example.com", EmploymentStatus::Staff, true).await;
    let service = DirectorySync::new(app_data.clone());

    service
        .sync(&admin, &[row("a@example.com", "総務部")])
        .await
        .unwrap();
    service
        .sync(&admin, &[row("a@example.com", "経理部")])
        .await
        .unwrap();

    let logs = app_data.audit_store.list_user_changes(10).await.unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].action, "UPDATE");
    let changed: Vec<String> =
        serde_json::from_str(logs[0].changed_fields.as_deref().unwrap()).unwrap();
    assert_eq!(changed, vec!["department"]);
    assert_eq!(logs[1].action, "CREATE");
}

#[tokio::test]
async fn sync_rejects_invalid_rows_before_writing() {
    let app_data = setup_app_data().await;
    let admin = seed_user(&app_data, "admin@example.com", EmploymentStatus::Staff, true).await;
    let service = DirectorySync::new(app_data.clone());

    let mut bad = row("a@example.com", "総務部");
    bad.department = "部".repeat(51);
    let err = service
        .sync(&admin, &[row("b@example.com", "営業部"), bad])
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::Validation { .. }));

    // Validation happens up front, so the good row was not created either
    assert!(app_data.user_store.get("b@example.com").await.unwrap().is_none());
}
