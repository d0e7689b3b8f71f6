use crate::types::db::sequence_counter::{self, Entity as SequenceCounter};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

/// Counter row for guest email sequence numbers
const GUEST_COUNTER_ID: &str = "guest";

/// Allocator for the unique numeric suffix of generated guest addresses.
///
/// Holds no state and takes no locks; callers must invoke it on the same
/// transaction that creates the account records, so concurrent issuers
/// serialize on the counter row through the store's transaction mechanism.
pub struct SequenceAllocator;

impl SequenceAllocator {
    /// Read the current counter (0 if the row does not exist yet), increment
    /// it, write it back, and return the newly assigned number.
    pub async fn allocate_next<C: ConnectionTrait>(conn: &C) -> Result<i64, sea_orm::DbErr> {
        let current = SequenceCounter::find_by_id(GUEST_COUNTER_ID)
            .one(conn)
            .await?;

        let next = current.as_ref().map(|row| row.value).unwrap_or(0) + 1;

        match current {
            Some(row) => {
                let mut active: sequence_counter::ActiveModel = row.into();
                active.value = Set(next);
                active.update(conn).await?;
            }
            None => {
                let active = sequence_counter::ActiveModel {
                    id: Set(GUEST_COUNTER_ID.to_string()),
                    value: Set(next),
                };
                active.insert(conn).await?;
            }
        }

        Ok(next)
    }

    /// Render the assigned number as a guest email address.
    ///
    /// Left-zero-padded to 4 digits; numbers past 9999 simply widen.
    pub fn format_guest_email(sequence: i64, domain: &str) -> String {
        format!("gst-{sequence:04}@{domain}")
    }
}
