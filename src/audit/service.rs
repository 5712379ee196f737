//! 审计日志服务
//!
//! Append-only：`record` 总是成功（只校验必填的 action / entityType），
//! 服务端赋 timestamp。查询按时间倒序。支持按条删除，
//! 从不做自动保留/清理。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::types::{AuditEntry, AuditEntryCreate, AuditQuery};
use crate::db::repository::record_key;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

const TABLE: &str = "audit_entry";

#[derive(Clone)]
pub struct AuditService {
    db: Surreal<Db>,
}

impl AuditService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// Append one entry; assigns the timestamp
    pub async fn record(&self, input: AuditEntryCreate) -> AppResult<AuditEntry> {
        let action = input
            .action
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| AppError::validation("action is required"))?;
        let entity_type = input
            .entity_type
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::validation("entityType is required"))?;

        let entry = AuditEntry {
            id: None,
            action,
            entity_type,
            entity_id: input.entity_id,
            operator: input.operator,
            details: input.details,
            timestamp: now_millis(),
        };

        let created: Option<AuditEntry> = self
            .db
            .create(TABLE)
            .content(entry)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        created.ok_or_else(|| AppError::database("Failed to record audit entry"))
    }

    /// 便捷写入（管理员动作的内部埋点）；失败只记日志，不影响主流程
    pub async fn log(
        &self,
        action: &str,
        entity_type: &str,
        entity_id: impl Into<String>,
        operator: Option<String>,
        details: serde_json::Value,
    ) {
        let input = AuditEntryCreate {
            action: Some(action.to_string()),
            entity_type: Some(entity_type.to_string()),
            entity_id: Some(entity_id.into()),
            operator,
            details,
        };
        if let Err(e) = self.record(input).await {
            tracing::warn!(action, error = %e, "Failed to record audit entry");
        }
    }

    /// Matching entries, newest first
    pub async fn query(&self, filter: AuditQuery) -> AppResult<Vec<AuditEntry>> {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.entity_type.is_some() {
            conditions.push("entityType = $entity_type");
        }
        if filter.entity_id.is_some() {
            conditions.push("entityId = $entity_id");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let query = format!("SELECT * FROM audit_entry{where_clause} ORDER BY timestamp DESC");

        let mut request = self.db.query(query);
        if let Some(entity_type) = filter.entity_type {
            request = request.bind(("entity_type", entity_type));
        }
        if let Some(entity_id) = filter.entity_id {
            request = request.bind(("entity_id", entity_id));
        }

        let entries: Vec<AuditEntry> = request
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .take(0)
            .map_err(|e| AppError::database(e.to_string()))?;
        Ok(entries)
    }

    /// Per-entry delete; never retention-based
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let deleted: Option<AuditEntry> = self
            .db
            .delete((TABLE, record_key(TABLE, id)))
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        Ok(deleted.is_some())
    }
}
