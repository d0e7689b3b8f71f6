use crate::audit::AuditLogger;
use crate::domain::validation::{validate_email, validate_guest_fields};
use crate::domain::{AccountAction, AccountStatus};
use crate::errors::AccountError;
use crate::stores::account_store::NewGuestSpec;
use crate::stores::{AccountStore, UserStore};
use crate::types::db::guest_account;
use crate::types::dto::account::{GuestSpec, UpdateAccountData};
use crate::types::internal::audit::{SystemActionEvent, SystemLogType};
use crate::types::internal::Principal;
use chrono::{DateTime, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use sea_orm::{IntoActiveModel, Set};
use std::sync::Arc;

/// Hard cap on how far ahead any expiration date may be set, in calendar
/// months from the moment of the transition.
pub const EXPIRATION_CAP_MONTHS: u32 = 3;

/// Operator id recorded for sweep transitions
const SYSTEM_OPERATOR: &str = "system";

/// Which accounts a list call returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Accounts the caller approves
    Mine,
    /// Every account (admin only)
    All,
}

/// The guest-account lifecycle state machine.
///
/// Validates and applies every state transition: issuance, extension
/// request/approval, direct extension, edits, approver delegation,
/// suspension, archival, restore, and the retention sweep. Authorization is
/// checked before any business rule; every applied transition stamps
/// `last_updated_date` and emits exactly one audit event.
pub struct LifecycleService {
    account_store: Arc<AccountStore>,
    user_store: Arc<UserStore>,
    audit_logger: Arc<AuditLogger>,
    guest_domain: String,
}

impl LifecycleService {
    /// Create a LifecycleService from AppData
    ///
    /// Extracts only the dependencies needed by the lifecycle flows from the
    /// centralized AppData.
    pub fn new(app_data: Arc<crate::app_data::AppData>) -> Self {
        Self {
            account_store: app_data.account_store.clone(),
            user_store: app_data.user_store.clone(),
            audit_logger: app_data.audit_logger.clone(),
            guest_domain: app_data.settings.guest_email_domain.clone(),
        }
    }

    /// Issue a batch of guest accounts
    ///
    /// Validates every guest spec up front (first failure wins), then creates
    /// the whole batch inside one transaction so sequence numbers are unique
    /// even under concurrent issuance. One `issue` audit event is recorded
    /// per created account.
    ///
    /// # Authorization
    /// Requires a STAFF principal.
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Ids of the created accounts, in batch order
    /// * `Err(AccountError)` - Forbidden, Validation, LimitExceeded, Conflict
    pub async fn issue(
        &self,
        actor: &Principal,
        guests: &[GuestSpec],
    ) -> Result<Vec<String>, AccountError> {
        if !actor.is_staff() {
            return Err(AccountError::forbidden(
                "Only staff may issue guest accounts",
            ));
        }
        if guests.is_empty() {
            return Err(AccountError::validation("guests", "At least one guest is required"));
        }

        let now = Utc::now();
        let mut specs = Vec::with_capacity(guests.len());

        for guest in guests {
            validate_guest_fields(
                Some(&guest.last_name),
                Some(&guest.first_name),
                Some(&guest.department),
                Some(&guest.usage_purpose),
                Some(&guest.approver_email),
            )?;

            let expiration = parse_timestamp(&guest.expiration_date, "expiration_date")?;
            enforce_expiration_cap(now, expiration, "expiration_date")?;

            self.require_staff_approver(&guest.approver_email, "approver_email")
                .await?;

            specs.push(NewGuestSpec {
                last_name: guest.last_name.clone(),
                first_name: guest.first_name.clone(),
                department: guest.department.clone(),
                usage_purpose: guest.usage_purpose.clone(),
                approver_id: guest.approver_email.clone(),
                expiration_date: expiration.timestamp(),
            });
        }

        let created = self
            .account_store
            .insert_batch_with_sequence(&specs, &actor.email, &self.guest_domain, now.timestamp())
            .await?;

        // Audit after commit; failures are swallowed by the logger
        for account in &created {
            let event = SystemActionEvent::new(
                SystemLogType::Issue,
                &actor.email,
                &actor.display_name(),
            )
            .target(&account.id)
            .field("last_name", account.last_name.as_str())
            .field("first_name", account.first_name.as_str())
            .field("department", account.department.as_str())
            .field("usage_purpose", account.usage_purpose.as_str())
            .field("approver_id", account.approver_id.as_str())
            .field("expiration_date", rfc3339(account.expiration_date));
            self.audit_logger.record_system_action(event).await;
        }

        tracing::info!(
            count = created.len(),
            issued_by = %actor.email,
            "Guest accounts issued"
        );

        Ok(created.into_iter().map(|a| a.id).collect())
    }

    /// Self-service extension request by a guest
    ///
    /// The caller's own email must be a guest-account id. Moves the account
    /// to EXTENSION_REQUESTED and records the requested date; the approver
    /// later promotes or ignores it.
    ///
    /// # Returns
    /// * `Err(AccountError::NotFound)` - caller has no guest account
    /// * `Err(AccountError::LimitExceeded)` - requested date beyond the cap
    pub async fn request_extension(
        &self,
        actor: &Principal,
        requested_date: &str,
    ) -> Result<(), AccountError> {
        let account = self
            .account_store
            .get(&actor.email)
            .await?
            .ok_or_else(|| AccountError::not_found(format!("No guest account: {}", actor.email)))?;

        let now = Utc::now();
        let requested = parse_timestamp(requested_date, "requested_date")?;
        enforce_expiration_cap(now, requested, "requested_date")?;

        let mut active = account.into_active_model();
        active.status = Set(AccountStatus::ExtensionRequested);
        active.requested_expiration_date = Set(Some(requested.timestamp()));
        active.last_updated_date = Set(now.timestamp());
        let saved = self.account_store.save(active).await?;

        let event = SystemActionEvent::new(
            SystemLogType::ExtensionRequest,
            &actor.email,
            &actor.display_name(),
        )
        .target(&saved.id)
        .field("requested_date", requested.to_rfc3339());
        self.audit_logger.record_system_action(event).await;

        Ok(())
    }

    /// Apply an approver/admin action to an existing account
    ///
    /// Dispatches EXTEND, EDIT, DELEGATE, APPROVE_EXTENSION, SUSPEND,
    /// ARCHIVE, and RESTORE through the central transition table.
    ///
    /// # Authorization
    /// The caller must be the account's approver (and STAFF) or an admin.
    /// Authorization failures are reported before any business-rule check.
    pub async fn update_account(
        &self,
        actor: &Principal,
        account_id: &str,
        action: AccountAction,
        data: &UpdateAccountData,
    ) -> Result<(), AccountError> {
        let profile = actor
            .profile
            .as_ref()
            .ok_or_else(|| AccountError::forbidden("Caller is not in the user directory"))?;
        if !profile.is_staff() && !profile.is_admin {
            return Err(AccountError::forbidden(
                "Only staff or admins may manage guest accounts",
            ));
        }

        let account = self
            .account_store
            .get(account_id)
            .await?
            .ok_or_else(|| AccountError::not_found(format!("Account not found: {account_id}")))?;

        if account.approver_id != actor.email && !profile.is_admin {
            return Err(AccountError::forbidden(
                "Not the approver of this account",
            ));
        }

        if !action.allowed_from(account.status) {
            return Err(AccountError::InvalidState {
                status: account.status,
                action,
            });
        }

        let now = Utc::now();
        let previous_status = account.status;
        let operator_name = actor.display_name();

        let event = match action {
            AccountAction::Extend => self.apply_extend(&account, data, now).await?,
            AccountAction::Edit => self.apply_edit(&account, data, now).await?,
            AccountAction::Delegate => self.apply_delegate(&account, data, now).await?,
            AccountAction::ApproveExtension => self.apply_approve(&account, now).await?,
            AccountAction::Suspend => self.apply_suspend(&account, now).await?,
            AccountAction::Archive => self.apply_archive(&account, now).await?,
            AccountAction::Restore => self.apply_restore(&account, now).await?,
        };

        let event = SystemActionEvent {
            operator_id: actor.email.clone(),
            operator_name,
            ..event
        };
        self.audit_logger.record_system_action(event).await;

        tracing::info!(
            account_id,
            action = %action,
            previous_status = %previous_status,
            actor = %actor.email,
            "Account transition applied"
        );

        Ok(())
    }

    async fn apply_extend(
        &self,
        account: &guest_account::Model,
        data: &UpdateAccountData,
        now: DateTime<Utc>,
    ) -> Result<SystemActionEvent, AccountError> {
        let raw = data
            .expiration_date
            .as_deref()
            .ok_or_else(|| AccountError::validation("expiration_date", "expiration_date is required"))?;
        let new_date = parse_timestamp(raw, "expiration_date")?;
        enforce_expiration_cap(now, new_date, "expiration_date")?;

        let old = account.expiration_date;
        let mut active = account.clone().into_active_model();
        active.expiration_date = Set(new_date.timestamp());
        active.last_updated_date = Set(now.timestamp());
        let saved = self.account_store.save(active).await?;

        Ok(
            SystemActionEvent::new(SystemLogType::Extend, SYSTEM_OPERATOR, SYSTEM_OPERATOR)
                .target(&saved.id)
                .field("old_expiration_date", rfc3339(old))
                .field("expiration_date", new_date.to_rfc3339()),
        )
    }

    async fn apply_edit(
        &self,
        account: &guest_account::Model,
        data: &UpdateAccountData,
        now: DateTime<Utc>,
    ) -> Result<SystemActionEvent, AccountError> {
        validate_guest_fields(
            data.last_name.as_deref(),
            data.first_name.as_deref(),
            data.department.as_deref(),
            data.usage_purpose.as_deref(),
            None,
        )?;

        let mut changed = Vec::new();
        let mut active = account.clone().into_active_model();
        if let Some(last_name) = &data.last_name {
            if last_name != &account.last_name {
                changed.push("last_name");
            }
            active.last_name = Set(last_name.clone());
        }
        if let Some(first_name) = &data.first_name {
            if first_name != &account.first_name {
                changed.push("first_name");
            }
            active.first_name = Set(first_name.clone());
        }
        if let Some(department) = &data.department {
            if department != &account.department {
                changed.push("department");
            }
            active.department = Set(department.clone());
        }
        if let Some(usage_purpose) = &data.usage_purpose {
            if usage_purpose != &account.usage_purpose {
                changed.push("usage_purpose");
            }
            active.usage_purpose = Set(usage_purpose.clone());
        }
        active.last_updated_date = Set(now.timestamp());
        let saved = self.account_store.save(active).await?;

        Ok(
            SystemActionEvent::new(SystemLogType::Edit, SYSTEM_OPERATOR, SYSTEM_OPERATOR)
                .target(&saved.id)
                .field(
                    "changed_fields",
                    serde_json::Value::from(
                        changed.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
                    ),
                ),
        )
    }

    async fn apply_delegate(
        &self,
        account: &guest_account::Model,
        data: &UpdateAccountData,
        now: DateTime<Utc>,
    ) -> Result<SystemActionEvent, AccountError> {
        let new_approver = data
            .new_approver_id
            .as_deref()
            .ok_or_else(|| AccountError::validation("new_approver_id", "new_approver_id is required"))?;
        validate_email(new_approver, "new_approver_id")?;
        self.require_staff_approver(new_approver, "new_approver_id")
            .await?;

        let old_approver = account.approver_id.clone();
        let mut active = account.clone().into_active_model();
        active.approver_id = Set(new_approver.to_string());
        active.last_updated_date = Set(now.timestamp());
        let saved = self.account_store.save(active).await?;

        Ok(
            SystemActionEvent::new(SystemLogType::Delegate, SYSTEM_OPERATOR, SYSTEM_OPERATOR)
                .target(&saved.id)
                .field("old_approver_id", old_approver)
                .field("new_approver_id", new_approver),
        )
    }

    async fn apply_approve(
        &self,
        account: &guest_account::Model,
        now: DateTime<Utc>,
    ) -> Result<SystemActionEvent, AccountError> {
        // The transition table pins the status; the requested date must also
        // be present before it can be promoted.
        let requested = account.requested_expiration_date.ok_or(AccountError::InvalidState {
            status: account.status,
            action: AccountAction::ApproveExtension,
        })?;

        let mut active = account.clone().into_active_model();
        active.status = Set(AccountStatus::Active);
        active.expiration_date = Set(requested);
        active.requested_expiration_date = Set(None);
        active.last_updated_date = Set(now.timestamp());
        let saved = self.account_store.save(active).await?;

        Ok(SystemActionEvent::new(
            SystemLogType::ApproveExtension,
            SYSTEM_OPERATOR,
            SYSTEM_OPERATOR,
        )
        .target(&saved.id)
        .field("expiration_date", rfc3339(requested))
        .field("approved", true))
    }

    async fn apply_suspend(
        &self,
        account: &guest_account::Model,
        now: DateTime<Utc>,
    ) -> Result<SystemActionEvent, AccountError> {
        let mut active = account.clone().into_active_model();
        active.status = Set(AccountStatus::Suspended);
        // Leaving EXTENSION_REQUESTED drops the pending request
        active.requested_expiration_date = Set(None);
        active.last_updated_date = Set(now.timestamp());
        let saved = self.account_store.save(active).await?;

        Ok(
            SystemActionEvent::new(SystemLogType::Suspend, SYSTEM_OPERATOR, SYSTEM_OPERATOR)
                .target(&saved.id)
                .field("previous_status", account.status.as_str()),
        )
    }

    async fn apply_archive(
        &self,
        account: &guest_account::Model,
        now: DateTime<Utc>,
    ) -> Result<SystemActionEvent, AccountError> {
        let mut active = account.clone().into_active_model();
        active.status = Set(AccountStatus::Archived);
        active.archived_at = Set(Some(now.timestamp()));
        active.requested_expiration_date = Set(None);
        active.last_updated_date = Set(now.timestamp());
        let saved = self.account_store.save(active).await?;

        Ok(
            SystemActionEvent::new(SystemLogType::Archive, SYSTEM_OPERATOR, SYSTEM_OPERATOR)
                .target(&saved.id)
                .field("previous_status", account.status.as_str()),
        )
    }

    async fn apply_restore(
        &self,
        account: &guest_account::Model,
        now: DateTime<Utc>,
    ) -> Result<SystemActionEvent, AccountError> {
        // An already-expired account comes back as PENDING rather than
        // ACTIVE; the expiration must be renewed before real use.
        let new_status = if account.expiration_date < now.timestamp() {
            AccountStatus::Pending
        } else {
            AccountStatus::Active
        };

        let mut active = account.clone().into_active_model();
        active.status = Set(new_status);
        active.archived_at = Set(None);
        active.last_updated_date = Set(now.timestamp());
        let saved = self.account_store.save(active).await?;

        Ok(
            SystemActionEvent::new(SystemLogType::Restore, SYSTEM_OPERATOR, SYSTEM_OPERATOR)
                .target(&saved.id)
                .field("previous_status", account.status.as_str())
                .field("new_status", new_status.as_str()),
        )
    }

    /// List accounts for the caller
    ///
    /// `Mine` returns accounts the caller approves (STAFF or admin);
    /// `All` returns everything (admin only). Both apply the display filter
    /// and kick off the retention sweep as a detached best-effort task, so
    /// listing latency never depends on sweep completion.
    pub async fn list_accounts(
        &self,
        actor: &Principal,
        scope: ListScope,
    ) -> Result<Vec<guest_account::Model>, AccountError> {
        let now = Utc::now();

        let accounts = match scope {
            ListScope::Mine => {
                if !actor.is_staff() && !actor.is_admin() {
                    return Err(AccountError::forbidden(
                        "Only staff or admins may list managed accounts",
                    ));
                }
                self.account_store.list_by_approver(&actor.email, now).await?
            }
            ListScope::All => {
                if !actor.is_admin() {
                    return Err(AccountError::forbidden("Admin role required"));
                }
                self.account_store.list_all(now).await?
            }
        };

        // Opportunistic retention sweep, detached from the read path
        let account_store = self.account_store.clone();
        let audit_logger = self.audit_logger.clone();
        tokio::spawn(async move {
            if let Err(e) = Self::sweep_stale_archives(&account_store, &audit_logger).await {
                tracing::warn!("Retention sweep failed: {e}");
            }
        });

        Ok(accounts)
    }

    /// Run the retention sweep to completion
    ///
    /// Flips every ARCHIVED account whose `archived_at` is past the
    /// retention window to DELETED and records a `sweep_delete` event per
    /// record. Normally triggered opportunistically by list reads; exposed
    /// for deterministic invocation.
    ///
    /// # Returns
    /// Number of accounts transitioned to DELETED
    pub async fn run_retention_sweep(&self) -> Result<usize, AccountError> {
        Self::sweep_stale_archives(&self.account_store, &self.audit_logger).await
    }

    async fn sweep_stale_archives(
        account_store: &AccountStore,
        audit_logger: &AuditLogger,
    ) -> Result<usize, AccountError> {
        let now = Utc::now();
        let stale = account_store.stale_archived(now).await?;
        let count = stale.len();

        for account in stale {
            let id = account.id.clone();
            let archived_at = account.archived_at;
            let mut active = account.into_active_model();
            active.status = Set(AccountStatus::Deleted);
            active.last_updated_date = Set(now.timestamp());
            account_store.save(active).await?;

            let event =
                SystemActionEvent::new(SystemLogType::SweepDelete, SYSTEM_OPERATOR, SYSTEM_OPERATOR)
                    .target(&id)
                    .field("previous_status", AccountStatus::Archived.as_str())
                    .field(
                        "archived_at",
                        archived_at.map(rfc3339).unwrap_or_default(),
                    );
            audit_logger.record_system_action(event).await;

            tracing::info!(account_id = %id, "Stale archived account deleted by retention sweep");
        }

        Ok(count)
    }

    /// Resolve an email to a STAFF directory profile or fail with a
    /// field-level error on the named request field.
    async fn require_staff_approver(&self, email: &str, field: &str) -> Result<(), AccountError> {
        let user = self
            .user_store
            .get(email)
            .await?
            .ok_or_else(|| AccountError::validation(field, format!("No such user: {email}")))?;
        if !user.is_staff() {
            return Err(AccountError::validation(
                field,
                format!("Not a staff member: {email}"),
            ));
        }
        Ok(())
    }
}

/// Reject dates beyond `now` plus the expiration cap.
fn enforce_expiration_cap(
    now: DateTime<Utc>,
    requested: DateTime<Utc>,
    field: &str,
) -> Result<(), AccountError> {
    let cap = now + Months::new(EXPIRATION_CAP_MONTHS);
    if requested > cap {
        return Err(AccountError::limit_exceeded(format!(
            "{field} exceeds the {EXPIRATION_CAP_MONTHS}-month limit"
        )));
    }
    Ok(())
}

/// Parse an RFC 3339 timestamp, falling back to YYYY-MM-DD at midnight UTC.
fn parse_timestamp(value: &str, field: &str) -> Result<DateTime<Utc>, AccountError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    Err(AccountError::validation(
        field,
        format!("Not a valid timestamp: {value}"),
    ))
}

fn rfc3339(epoch: i64) -> String {
    DateTime::<Utc>::from_timestamp(epoch, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod lifecycle_tests;
