//! Booking Item Model
//!
//! Booking ↔ FoodItem 连接表。保存菜单选择时整表替换
//! （replace-all-on-save），不做差量合并。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Booking item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub booking: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub food_item: RecordId,
    /// 份数（按客人数计）
    pub quantity: i64,
}

/// Booking item input (from the admin menu editor)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingItemInput {
    #[serde(with = "serde_helpers::record_id")]
    pub food_item: RecordId,
    pub quantity: i64,
}
