//! Booking Item Repository
//!
//! Replace-all-on-save：删除 + 重建在同一个事务里执行，
//! 读者不会观察到中间的空窗口。

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoResult, record_key};
use crate::db::models::BookingItem;

const TABLE: &str = "booking_item";
const BOOKING_TABLE: &str = "booking";

#[derive(Clone)]
pub struct BookingItemRepository {
    base: BaseRepository,
}

/// 写入行：引用字段用原生 RecordId，落库为 record link
/// （模型的字符串形式只用于 API JSON）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemRow {
    booking: RecordId,
    food_item: RecordId,
    quantity: i64,
}

impl BookingItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_booking(&self, booking_id: &str) -> RepoResult<Vec<BookingItem>> {
        let booking = RecordId::from_table_key(BOOKING_TABLE, record_key(BOOKING_TABLE, booking_id));
        let items: Vec<BookingItem> = self
            .base
            .db()
            .query("SELECT * FROM booking_item WHERE booking = $booking")
            .bind(("booking", booking))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Replace the full item set of a booking atomically
    pub async fn replace_all(
        &self,
        booking_id: &str,
        items: Vec<BookingItem>,
    ) -> RepoResult<Vec<BookingItem>> {
        let booking = RecordId::from_table_key(BOOKING_TABLE, record_key(BOOKING_TABLE, booking_id));

        let rows: Vec<ItemRow> = items
            .into_iter()
            .map(|item| ItemRow {
                booking: item.booking,
                food_item: item.food_item,
                quantity: item.quantity,
            })
            .collect();

        self.base
            .db()
            .query(
                "BEGIN TRANSACTION;
                 DELETE booking_item WHERE booking = $booking;
                 INSERT INTO booking_item $items;
                 COMMIT TRANSACTION;",
            )
            .bind(("booking", booking))
            .bind(("items", rows))
            .await?
            .check()?;

        self.find_by_booking(booking_id).await
    }
}
