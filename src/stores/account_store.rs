use crate::domain::AccountStatus;
use crate::errors::{AccountError, InternalError};
use crate::stores::sequence_allocator::SequenceAllocator;
use crate::types::db::guest_account::{self, Entity as GuestAccount};
use chrono::{DateTime, Months, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// How long suspended/archived records stay visible and archived records
/// survive before the sweep deletes them, in calendar months.
pub const RETENTION_MONTHS: u32 = 6;

/// Attempts for the issuance transaction before surfacing a conflict.
const ISSUE_MAX_ATTEMPTS: u32 = 3;

/// Input for one account creation inside the issuance transaction.
///
/// The id, status, and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewGuestSpec {
    pub last_name: String,
    pub first_name: String,
    pub department: String,
    pub usage_purpose: String,
    pub approver_id: String,
    pub expiration_date: i64,
}

/// Repository for guest-account records.
///
/// Encapsulates the listing view logic (exclude deleted and stale records)
/// and the transactional issuance path that assigns sequence numbers.
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetch a single account by its generated email id
    pub async fn get(&self, id: &str) -> Result<Option<guest_account::Model>, InternalError> {
        GuestAccount::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_account", e))
    }

    /// Accounts approved by the given user, display-filtered and ordered by
    /// last update descending
    pub async fn list_by_approver(
        &self,
        approver_email: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<guest_account::Model>, InternalError> {
        let accounts = GuestAccount::find()
            .filter(guest_account::Column::ApproverId.eq(approver_email))
            .order_by_desc(guest_account::Column::LastUpdatedDate)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_by_approver", e))?;

        Ok(Self::apply_display_filter(accounts, now))
    }

    /// All accounts, display-filtered and ordered by last update descending
    pub async fn list_all(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<guest_account::Model>, InternalError> {
        let accounts = GuestAccount::find()
            .order_by_desc(guest_account::Column::LastUpdatedDate)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_all", e))?;

        Ok(Self::apply_display_filter(accounts, now))
    }

    /// The listing view: hides deleted records, suspended records not touched
    /// within the retention window, and archived records past the retention
    /// window. The archived rule anticipates the sweep, so stale results are
    /// never shown even before the sweep has run.
    fn apply_display_filter(
        accounts: Vec<guest_account::Model>,
        now: DateTime<Utc>,
    ) -> Vec<guest_account::Model> {
        let cutoff = retention_cutoff(now);

        accounts
            .into_iter()
            .filter(|account| match account.status {
                AccountStatus::Deleted => false,
                AccountStatus::Suspended => account.last_updated_date >= cutoff,
                AccountStatus::Archived => account.archived_at.map_or(true, |at| at >= cutoff),
                _ => true,
            })
            .collect()
    }

    /// Archived accounts whose archive timestamp has passed the retention
    /// window; candidates for the sweep.
    pub async fn stale_archived(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<guest_account::Model>, InternalError> {
        let cutoff = retention_cutoff(now);

        GuestAccount::find()
            .filter(guest_account::Column::Status.eq(AccountStatus::Archived))
            .filter(guest_account::Column::ArchivedAt.lt(cutoff))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("stale_archived", e))
    }

    /// Persist a single-record mutation prepared by the caller.
    ///
    /// Non-issuance transitions operate on one document and are safe under
    /// last-write-wins, so no transaction wrapper is used here.
    pub async fn save(
        &self,
        account: guest_account::ActiveModel,
    ) -> Result<guest_account::Model, InternalError> {
        account
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("save_account", e))
    }

    /// Create a batch of accounts, assigning each its sequence number from
    /// the shared counter inside a single transaction.
    ///
    /// The whole transaction is retried a bounded number of times on
    /// lock/serialization conflicts with concurrent issuers; exhaustion
    /// surfaces as `AccountError::Conflict`. Either every record in the batch
    /// is created or none is.
    pub async fn insert_batch_with_sequence(
        &self,
        specs: &[NewGuestSpec],
        created_by: &str,
        domain: &str,
        now: i64,
    ) -> Result<Vec<guest_account::Model>, AccountError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_insert_batch(specs, created_by, domain, now).await {
                Ok(created) => return Ok(created),
                Err(e) if is_conflict(&e) => {
                    if attempt >= ISSUE_MAX_ATTEMPTS {
                        tracing::error!(attempts = attempt, "Issuance transaction retries exhausted");
                        return Err(AccountError::Conflict);
                    }
                    tracing::warn!(attempt, "Issuance transaction conflict, retrying: {e}");
                }
                Err(e) => {
                    return Err(InternalError::database("insert_batch_with_sequence", e).into())
                }
            }
        }
    }

    async fn try_insert_batch(
        &self,
        specs: &[NewGuestSpec],
        created_by: &str,
        domain: &str,
        now: i64,
    ) -> Result<Vec<guest_account::Model>, sea_orm::DbErr> {
        let txn = self.db.begin().await?;

        let mut created = Vec::with_capacity(specs.len());
        for spec in specs {
            let sequence = SequenceAllocator::allocate_next(&txn).await?;
            let id = SequenceAllocator::format_guest_email(sequence, domain);

            let account = guest_account::ActiveModel {
                id: Set(id),
                last_name: Set(spec.last_name.clone()),
                first_name: Set(spec.first_name.clone()),
                department: Set(spec.department.clone()),
                usage_purpose: Set(spec.usage_purpose.clone()),
                approver_id: Set(spec.approver_id.clone()),
                expiration_date: Set(spec.expiration_date),
                status: Set(AccountStatus::Active),
                requested_expiration_date: Set(None),
                last_updated_date: Set(now),
                created_at: Set(now),
                created_by: Set(created_by.to_string()),
                archived_at: Set(None),
            };

            created.push(account.insert(&txn).await?);
        }

        txn.commit().await?;
        Ok(created)
    }
}

/// Epoch timestamp of `now` minus the retention window
pub fn retention_cutoff(now: DateTime<Utc>) -> i64 {
    now.checked_sub_months(Months::new(RETENTION_MONTHS))
        .unwrap_or(now)
        .timestamp()
}

fn is_conflict(err: &sea_orm::DbErr) -> bool {
    let message = err.to_string().to_lowercase();
    message.contains("locked")
        || message.contains("busy")
        || message.contains("serialize")
        || message.contains("deadlock")
}
