//! Booking Model — 核心实体
//!
//! 一个 Booking 携带两个独立的付款阶段（advance / final）。
//! 每个阶段有两个独立的标志位：
//! - `status` — 客户动作（上传付款截图）或管理员覆盖
//! - `approvalStatus` — 仅管理员动作
//!
//! 一个阶段只有在 `status = paid` 且 `approvalStatus = approved`
//! 时才算真正结清。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Booking ID type
pub type BookingId = RecordId;

/// 活动生命周期状态（与付款状态互相独立）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// 付款阶段标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentPhase {
    Advance,
    Final,
}

impl std::str::FromStr for PaymentPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "advance" => Ok(PaymentPhase::Advance),
            "final" => Ok(PaymentPhase::Final),
            other => Err(format!("unknown payment phase: {other}")),
        }
    }
}

impl std::fmt::Display for PaymentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentPhase::Advance => write!(f, "advance"),
            PaymentPhase::Final => write!(f, "final"),
        }
    }
}

/// 付款标志（客户侧）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

/// 审批标志（仅管理员）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
}

/// 单个付款阶段的状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentState {
    pub status: PaymentStatus,
    pub approval_status: ApprovalStatus,
    /// 付款截图（不透明 base64 载荷，按原样持久化）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
}

impl PaymentState {
    /// 阶段已结清：status = paid 且 approvalStatus = approved
    pub fn is_settled(&self) -> bool {
        self.status == PaymentStatus::Paid && self.approval_status == ApprovalStatus::Approved
    }
}

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<BookingId>,
    pub client_name: String,
    /// 活动日期 (YYYY-MM-DD)
    pub event_date: String,
    pub event_type: String,
    pub guest_count: i64,
    /// 每位客人的单价（货币最小单位）
    pub price_per_plate: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub contact_email: String,
    pub contact_phone: String,
    pub total_amount: i64,
    pub advance_amount: i64,
    pub status: BookingStatus,
    pub advance_payment: PaymentState,
    pub final_payment: PaymentState,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Booking {
    pub fn payment(&self, phase: PaymentPhase) -> &PaymentState {
        match phase {
            PaymentPhase::Advance => &self.advance_payment,
            PaymentPhase::Final => &self.final_payment,
        }
    }

    pub fn payment_mut(&mut self, phase: PaymentPhase) -> &mut PaymentState {
        match phase {
            PaymentPhase::Advance => &mut self.advance_payment,
            PaymentPhase::Final => &mut self.final_payment,
        }
    }

    /// 两个阶段都结清才算完全付清
    pub fn is_fully_paid(&self) -> bool {
        self.advance_payment.is_settled() && self.final_payment.is_settled()
    }

    /// 剩余应付金额（只扣除已结清的阶段）
    pub fn balance_remaining(&self) -> i64 {
        let mut balance = self.total_amount;
        if self.advance_payment.is_settled() {
            balance -= self.advance_amount;
        }
        if self.final_payment.is_settled() {
            balance -= self.total_amount - self.advance_amount;
        }
        balance
    }
}

/// Create booking payload
///
/// 所有字段都是 Option，缺失字段在 service 层统一收集后
/// 以一条 ValidationError 报告。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreate {
    pub client_name: Option<String>,
    pub event_date: Option<String>,
    pub event_type: Option<String>,
    pub guest_count: Option<i64>,
    pub price_per_plate: Option<i64>,
    pub special_requests: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    /// 调用方可预先固定金额；缺省时由 service 计算
    pub total_amount: Option<i64>,
    pub advance_amount: Option<i64>,
}

/// Update booking payload (shallow merge — absent fields stay untouched)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_plate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    /// 管理员直接编辑付款阶段（覆盖写整个阶段对象）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance_payment: Option<PaymentState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_payment: Option<PaymentState>,
}
