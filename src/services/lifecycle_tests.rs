use super::*;
use crate::domain::EmploymentStatus;
use crate::test::utils::{guest_principal, seed_user, setup_app_data};
use crate::types::dto::account::GuestSpec;
use chrono::Duration;

fn guest_spec(approver: &str, expiration: DateTime<Utc>) -> GuestSpec {
    GuestSpec {
        last_name: "山田".to_string(),
        first_name: "太郎".to_string(),
        department: "営業部".to_string(),
        usage_purpose: "システム検証のための一時利用".to_string(),
        approver_email: approver.to_string(),
        expiration_date: expiration.to_rfc3339(),
    }
}

async fn issue_one(
    service: &LifecycleService,
    actor: &Principal,
    approver: &str,
) -> String {
    let expiration = Utc::now() + Duration::days(30);
    let ids = service
        .issue(actor, &[guest_spec(approver, expiration)])
        .await
        .expect("issue should succeed");
    ids.into_iter().next().expect("one id")
}

#[tokio::test]
async fn issue_assigns_sequential_ids_from_one() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = LifecycleService::new(app_data.clone());

    let expiration = Utc::now() + Duration::days(30);
    let ids = service
        .issue(
            &staff,
            &[
                guest_spec("staff@example.com", expiration),
                guest_spec("staff@example.com", expiration),
            ],
        )
        .await
        .expect("batch issue should succeed");

    assert_eq!(ids, vec!["gst-0001@ogw3.com", "gst-0002@ogw3.com"]);

    let account = app_data
        .account_store
        .get("gst-0001@ogw3.com")
        .await
        .unwrap()
        .expect("account should exist");
    assert_eq!(account.status, AccountStatus::Active);
    assert_eq!(account.last_name, "山田");
    assert_eq!(account.created_by, "staff@example.com");
}

#[tokio::test]
async fn issue_continues_sequence_across_batches() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = LifecycleService::new(app_data.clone());

    let first = issue_one(&service, &staff, "staff@example.com").await;
    let second = issue_one(&service, &staff, "staff@example.com").await;
    let third = issue_one(&service, &staff, "staff@example.com").await;

    assert_eq!(first, "gst-0001@ogw3.com");
    assert_eq!(second, "gst-0002@ogw3.com");
    assert_eq!(third, "gst-0003@ogw3.com");
}

#[tokio::test]
async fn concurrent_issuances_allocate_contiguous_unique_ids() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = Arc::new(LifecycleService::new(app_data.clone()));

    let mut handles = Vec::new();
    for _ in 0..5 {
        let service = service.clone();
        let actor = staff.clone();
        handles.push(tokio::spawn(async move {
            issue_one(&service, &actor, "staff@example.com").await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.expect("issuance task should not panic"));
    }

    ids.sort();
    let expected: Vec<String> = (1..=5).map(|n| format!("gst-{n:04}@ogw3.com")).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn issue_requires_staff() {
    let app_data = setup_app_data().await;
    seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let other = seed_user(&app_data, "other@example.com", EmploymentStatus::Other, false).await;
    let service = LifecycleService::new(app_data.clone());

    let expiration = Utc::now() + Duration::days(30);
    let err = service
        .issue(&other, &[guest_spec("staff@example.com", expiration)])
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::Forbidden(_)));
}

#[tokio::test]
async fn issue_rejects_expiration_past_three_months() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = LifecycleService::new(app_data.clone());

    let four_months_out = Utc::now() + Duration::days(123);
    let err = service
        .issue(&staff, &[guest_spec("staff@example.com", four_months_out)])
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::LimitExceeded { .. }));
}

#[tokio::test]
async fn issue_rejects_non_staff_approver() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    seed_user(&app_data, "guestish@example.com", EmploymentStatus::Guest, false).await;
    let service = LifecycleService::new(app_data.clone());

    let expiration = Utc::now() + Duration::days(30);
    let err = service
        .issue(&staff, &[guest_spec("guestish@example.com", expiration)])
        .await
        .unwrap_err();
    match err {
        AccountError::Validation { field, .. } => assert_eq!(field, "approver_email"),
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn issue_rejects_overlong_name() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = LifecycleService::new(app_data.clone());

    let mut spec = guest_spec("staff@example.com", Utc::now() + Duration::days(30));
    spec.last_name = "名".repeat(21);
    let err = service.issue(&staff, &[spec]).await.unwrap_err();
    match err {
        AccountError::Validation { field, .. } => assert_eq!(field, "last_name"),
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn extension_request_marks_account() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = LifecycleService::new(app_data.clone());

    let id = issue_one(&service, &staff, "staff@example.com").await;
    let guest = guest_principal(&id);
    let requested = Utc::now() + Duration::days(60);
    service
        .request_extension(&guest, &requested.to_rfc3339())
        .await
        .expect("extension request should succeed");

    let account = app_data.account_store.get(&id).await.unwrap().unwrap();
    assert_eq!(account.status, AccountStatus::ExtensionRequested);
    assert_eq!(
        account.requested_expiration_date,
        Some(requested.timestamp())
    );
}

#[tokio::test]
async fn extension_request_without_account_is_not_found() {
    let app_data = setup_app_data().await;
    let service = LifecycleService::new(app_data.clone());

    let requested = (Utc::now() + Duration::days(30)).to_rfc3339();
    let err = service
        .request_extension(&guest_principal("nobody@ogw3.com"), &requested)
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::NotFound(_)));
}

#[tokio::test]
async fn approve_extension_promotes_requested_date() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = LifecycleService::new(app_data.clone());

    let id = issue_one(&service, &staff, "staff@example.com").await;
    let requested = Utc::now() + Duration::days(60);
    service
        .request_extension(&guest_principal(&id), &requested.to_rfc3339())
        .await
        .unwrap();

    service
        .update_account(
            &staff,
            &id,
            AccountAction::ApproveExtension,
            &UpdateAccountData::default(),
        )
        .await
        .expect("approval should succeed");

    let account = app_data.account_store.get(&id).await.unwrap().unwrap();
    assert_eq!(account.status, AccountStatus::Active);
    assert_eq!(account.expiration_date, requested.timestamp());
    assert_eq!(account.requested_expiration_date, None);
}

#[tokio::test]
async fn approve_extension_from_active_is_invalid_state() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = LifecycleService::new(app_data.clone());

    let id = issue_one(&service, &staff, "staff@example.com").await;
    let err = service
        .update_account(
            &staff,
            &id,
            AccountAction::ApproveExtension,
            &UpdateAccountData::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::InvalidState { .. }));
}

#[tokio::test]
async fn update_requires_approver_or_admin() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let other_staff =
        seed_user(&app_data, "other@example.com", EmploymentStatus::Staff, false).await;
    let admin = seed_user(&app_data, "admin@example.com", EmploymentStatus::Staff, true).await;
    let service = LifecycleService::new(app_data.clone());

    let id = issue_one(&service, &staff, "staff@example.com").await;

    let err = service
        .update_account(
            &other_staff,
            &id,
            AccountAction::Suspend,
            &UpdateAccountData::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::Forbidden(_)));

    // An admin who is not the approver may act
    service
        .update_account(&admin, &id, AccountAction::Suspend, &UpdateAccountData::default())
        .await
        .expect("admin should be allowed");
}

#[tokio::test]
async fn suspend_twice_is_invalid_state() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = LifecycleService::new(app_data.clone());

    let id = issue_one(&service, &staff, "staff@example.com").await;
    service
        .update_account(&staff, &id, AccountAction::Suspend, &UpdateAccountData::default())
        .await
        .unwrap();

    let err = service
        .update_account(&staff, &id, AccountAction::Suspend, &UpdateAccountData::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::InvalidState { .. }));
}

#[tokio::test]
async fn restore_returns_active_when_not_expired() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = LifecycleService::new(app_data.clone());

    let id = issue_one(&service, &staff, "staff@example.com").await;
    service
        .update_account(&staff, &id, AccountAction::Archive, &UpdateAccountData::default())
        .await
        .unwrap();
    service
        .update_account(&staff, &id, AccountAction::Restore, &UpdateAccountData::default())
        .await
        .unwrap();

    let account = app_data.account_store.get(&id).await.unwrap().unwrap();
    assert_eq!(account.status, AccountStatus::Active);
    assert_eq!(account.archived_at, None);
}

#[tokio::test]
async fn restore_of_expired_account_lands_in_pending() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = LifecycleService::new(app_data.clone());

    let id = issue_one(&service, &staff, "staff@example.com").await;
    service
        .update_account(&staff, &id, AccountAction::Suspend, &UpdateAccountData::default())
        .await
        .unwrap();

    // Backdate the expiration below the current time
    let account = app_data.account_store.get(&id).await.unwrap().unwrap();
    let mut active = account.into_active_model();
    active.expiration_date = Set((Utc::now() - Duration::days(1)).timestamp());
    app_data.account_store.save(active).await.unwrap();

    service
        .update_account(&staff, &id, AccountAction::Restore, &UpdateAccountData::default())
        .await
        .unwrap();

    let account = app_data.account_store.get(&id).await.unwrap().unwrap();
    assert_eq!(account.status, AccountStatus::Pending);
}

#[tokio::test]
async fn delegate_requires_staff_target() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let next = seed_user(&app_data, "next@example.com", EmploymentStatus::Staff, false).await;
    seed_user(&app_data, "guestish@example.com", EmploymentStatus::Guest, false).await;
    let service = LifecycleService::new(app_data.clone());

    let id = issue_one(&service, &staff, "staff@example.com").await;

    let err = service
        .update_account(
            &staff,
            &id,
            AccountAction::Delegate,
            &UpdateAccountData {
                new_approver_id: Some("guestish@example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::Validation { .. }));

    service
        .update_account(
            &staff,
            &id,
            AccountAction::Delegate,
            &UpdateAccountData {
                new_approver_id: Some("next@example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("delegation to staff should succeed");

    let account = app_data.account_store.get(&id).await.unwrap().unwrap();
    assert_eq!(account.approver_id, "next@example.com");

    // The new approver can now act on the account
    service
        .update_account(&next, &id, AccountAction::Suspend, &UpdateAccountData::default())
        .await
        .expect("new approver should be allowed");
}

#[tokio::test]
async fn edit_updates_profile_fields_only() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = LifecycleService::new(app_data.clone());

    let id = issue_one(&service, &staff, "staff@example.com").await;
    let before = app_data.account_store.get(&id).await.unwrap().unwrap();

    service
        .update_account(
            &staff,
            &id,
            AccountAction::Edit,
            &UpdateAccountData {
                department: Some("総務部".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let after = app_data.account_store.get(&id).await.unwrap().unwrap();
    assert_eq!(after.department, "総務部");
    assert_eq!(after.last_name, before.last_name);
    assert_eq!(after.expiration_date, before.expiration_date);
}

#[tokio::test]
async fn extend_rejects_date_past_cap() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = LifecycleService::new(app_data.clone());

    let id = issue_one(&service, &staff, "staff@example.com").await;
    let err = service
        .update_account(
            &staff,
            &id,
            AccountAction::Extend,
            &UpdateAccountData {
                expiration_date: Some((Utc::now() + Duration::days(123)).to_rfc3339()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::LimitExceeded { .. }));
}

#[tokio::test]
async fn list_mine_excludes_other_approvers() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let other = seed_user(&app_data, "other@example.com", EmploymentStatus::Staff, false).await;
    let service = LifecycleService::new(app_data.clone());

    issue_one(&service, &staff, "staff@example.com").await;
    issue_one(&service, &other, "other@example.com").await;

    let mine = service.list_accounts(&staff, ListScope::Mine).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].approver_id, "staff@example.com");
}

#[tokio::test]
async fn list_all_requires_admin() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let admin = seed_user(&app_data, "admin@example.com", EmploymentStatus::Staff, true).await;
    let service = LifecycleService::new(app_data.clone());

    issue_one(&service, &staff, "staff@example.com").await;

    let err = service.list_accounts(&staff, ListScope::All).await.unwrap_err();
    assert!(matches!(err, AccountError::Forbidden(_)));

    let all = service.list_accounts(&admin, ListScope::All).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn sweep_deletes_and_hides_stale_archives() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = LifecycleService::new(app_data.clone());

    let id = issue_one(&service, &staff, "staff@example.com").await;
    service
        .update_account(&staff, &id, AccountAction::Archive, &UpdateAccountData::default())
        .await
        .unwrap();

    // Backdate the archive past the retention window
    let account = app_data.account_store.get(&id).await.unwrap().unwrap();
    let mut active = account.into_active_model();
    active.archived_at = Set(Some(
        (Utc::now() - Duration::days(190)).timestamp(),
    ));
    app_data.account_store.save(active).await.unwrap();

    let swept = service.run_retention_sweep().await.unwrap();
    assert_eq!(swept, 1);

    let account = app_data.account_store.get(&id).await.unwrap().unwrap();
    assert_eq!(account.status, AccountStatus::Deleted);

    let mine = service.list_accounts(&staff, ListScope::Mine).await.unwrap();
    assert!(mine.is_empty());
}

#[tokio::test]
async fn issue_writes_audit_entries() {
    let app_data = setup_app_data().await;
    let staff = seed_user(&app_data, "staff@example.com", EmploymentStatus::Staff, false).await;
    let service = LifecycleService::new(app_data.clone());

    let id = issue_one(&service, &staff, "staff@example.com").await;

    let events = app_data.audit_store.list_system_events(10).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].log_type, "issue");
    assert_eq!(events[0].target_account_id.as_deref(), Some(id.as_str()));
    assert_eq!(events[0].operator_id, "staff@example.com");
}
