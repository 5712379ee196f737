//! Admin Notification API Handlers — 全部需要管理员登录

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::AdminUser;
use crate::core::ServerState;
use crate::db::models::{AdminNotification, NotificationCreate, NotificationUpdate};
use crate::utils::time::now_millis;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// List all notifications, newest first
pub async fn list(
    State(state): State<ServerState>,
    _admin: AdminUser,
) -> AppResult<Json<AppResponse<Vec<AdminNotification>>>> {
    Ok(ok(state.notifications.find_all().await?))
}

/// Create a notification
pub async fn create(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Json(input): Json<NotificationCreate>,
) -> AppResult<Json<AppResponse<AdminNotification>>> {
    validate_required_text(&input.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&input.message, "message", MAX_NOTE_LEN)?;

    let notification = AdminNotification {
        id: None,
        title: input.title,
        message: input.message,
        read: false,
        created_at: now_millis(),
    };
    Ok(ok(state.notifications.create(notification).await?))
}

/// Mark a notification read/unread
pub async fn update(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(partial): Json<NotificationUpdate>,
) -> AppResult<Json<AppResponse<AdminNotification>>> {
    Ok(ok(state.notifications.merge(&id, partial).await?))
}

/// Delete a notification
pub async fn remove(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = state.notifications.delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Notification {} not found", id)));
    }
    Ok(ok(true))
}
