//! Audit History API Handlers — 全部需要管理员登录

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::audit::{AuditEntry, AuditEntryCreate, AuditQuery};
use crate::auth::AdminUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Query audit entries, newest first; filterable by entityType / entityId
pub async fn query(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Query(filter): Query<AuditQuery>,
) -> AppResult<Json<AppResponse<Vec<AuditEntry>>>> {
    Ok(ok(state.audit.query(filter).await?))
}

/// Record an audit entry submitted by the admin frontend
pub async fn record(
    State(state): State<ServerState>,
    admin: AdminUser,
    Json(mut input): Json<AuditEntryCreate>,
) -> AppResult<Json<AppResponse<AuditEntry>>> {
    if input.operator.is_none() {
        input.operator = Some(admin.subject);
    }
    Ok(ok(state.audit.record(input).await?))
}

/// Delete one audit entry
pub async fn remove(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = state.audit.delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Audit entry {} not found", id)));
    }
    Ok(ok(true))
}
