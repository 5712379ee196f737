//! 审计日志类型定义
//!
//! 管理端动作与系统通知的 append-only 记录。action 是自由文本
//! （管理端定义自己的动作词汇），只校验必填。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::db::models::serde_helpers;

/// 审计日志条目
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// 动作（必填，自由文本，如 "payment_approved"）
    pub action: String,
    /// 实体类型（必填，如 "booking"）
    pub entity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// 操作者标识（管理端会话）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// 任意结构化细节
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
    /// 服务端赋值，Unix millis
    pub timestamp: i64,
}

/// 写入请求（timestamp 由服务端赋值）
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntryCreate {
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub operator: Option<String>,
    #[serde(default)]
    pub details: serde_json::Value,
}

/// 查询过滤
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
}
