//! Staff Booking Request Model
//!
//! Staff ↔ Booking 的指派请求。每对 (booking, staff) 只有一行。
//! `token` 是公开确认页的唯一凭证（capability URL）。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use super::{Booking, Staff};

/// 指派请求状态机：pending 为初始态，accepted / rejected 为终态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    /// 终态：accepted 或 rejected
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

/// Staff booking request entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffBookingRequest {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub booking: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub staff: RecordId,
    pub status: RequestStatus,
    /// 不可猜测的确认令牌
    pub token: String,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<i64>,
}

/// 公开确认页的只读联合视图
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRequest {
    pub request: StaffBookingRequest,
    pub booking: Booking,
    pub staff: Staff,
}

/// 管理端「谁被请求过」视图（含状态）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedStaffView {
    pub request_id: String,
    pub status: RequestStatus,
    pub staff: Staff,
}
