//! Booking Repository

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Booking, BookingUpdate, PaymentState};
use crate::utils::time::now_millis;

const TABLE: &str = "booking";

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

/// 单个付款阶段的覆盖写（merge 用）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    advance_payment: Option<PaymentState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_payment: Option<PaymentState>,
    updated_at: i64,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all bookings, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self
            .base
            .db()
            .query("SELECT * FROM booking ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(bookings)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Booking>> {
        let booking: Option<Booking> =
            self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(booking)
    }

    pub async fn create(&self, booking: Booking) -> RepoResult<Booking> {
        let created: Option<Booking> = self.base.db().create(TABLE).content(booking).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create booking".to_string()))
    }

    /// Shallow merge — absent fields stay untouched
    pub async fn merge(&self, id: &str, data: BookingUpdate) -> RepoResult<Booking> {
        let record_id = RecordId::from_table_key(TABLE, record_key(TABLE, id));

        // updatedAt rides along with every merge
        let _ = self
            .base
            .db()
            .query("UPDATE $id SET updatedAt = $now")
            .bind(("id", record_id.clone()))
            .bind(("now", now_millis()))
            .await?;

        let updated: Option<Booking> = self.base.db().update(record_id).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Booking {} not found", id)))
    }

    /// Overwrite one payment phase object
    pub async fn set_payment(
        &self,
        id: &str,
        advance: Option<PaymentState>,
        r#final: Option<PaymentState>,
    ) -> RepoResult<Booking> {
        let record_id = RecordId::from_table_key(TABLE, record_key(TABLE, id));
        let patch = PaymentPatch {
            advance_payment: advance,
            final_payment: r#final,
            updated_at: now_millis(),
        };
        let updated: Option<Booking> = self.base.db().update(record_id).merge(patch).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Booking {} not found", id)))
    }

    /// Hard delete, cascading to booking items and staff requests.
    ///
    /// 单事务执行，返回 booking 是否存在过。
    pub async fn delete_cascade(&self, id: &str) -> RepoResult<bool> {
        let record_id = RecordId::from_table_key(TABLE, record_key(TABLE, id));

        let existing: Option<Booking> = self.base.db().select(record_id.clone()).await?;
        if existing.is_none() {
            return Ok(false);
        }

        self.base
            .db()
            .query(
                "BEGIN TRANSACTION;
                 DELETE booking_item WHERE booking = $booking;
                 DELETE staff_request WHERE booking = $booking;
                 DELETE $booking;
                 COMMIT TRANSACTION;",
            )
            .bind(("booking", record_id))
            .await?
            .check()?;

        Ok(true)
    }
}
