//! Staff API Handlers — 全部需要管理员登录

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::AdminUser;
use crate::core::ServerState;
use crate::db::models::{Staff, StaffCreate, StaffUpdate};
use crate::utils::time::now_millis;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok};

const RESOURCE: &str = "staff";

/// List all staff
pub async fn list(
    State(state): State<ServerState>,
    _admin: AdminUser,
) -> AppResult<Json<AppResponse<Vec<Staff>>>> {
    Ok(ok(state.staff.find_all().await?))
}

/// Get one staff member
pub async fn get(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Staff>>> {
    let member = state
        .staff
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Staff {} not found", id)))?;
    Ok(ok(member))
}

/// Create a staff member
pub async fn create(
    State(state): State<ServerState>,
    admin: AdminUser,
    Json(input): Json<StaffCreate>,
) -> AppResult<Json<AppResponse<Staff>>> {
    validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&input.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let member = Staff {
        id: None,
        name: input.name,
        role: input.role,
        phone: input.phone,
        created_at: now_millis(),
    };

    let created = state.staff.create(member).await?;
    state
        .audit
        .log(
            "create",
            RESOURCE,
            created.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            Some(admin.subject),
            serde_json::json!({ "name": &created.name }),
        )
        .await;
    Ok(ok(created))
}

/// Update a staff member
pub async fn update(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(partial): Json<StaffUpdate>,
) -> AppResult<Json<AppResponse<Staff>>> {
    if let Some(name) = &partial.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }

    let updated = state.staff.merge(&id, partial).await?;
    state
        .audit
        .log(
            "update",
            RESOURCE,
            id,
            Some(admin.subject),
            serde_json::json!({ "name": &updated.name }),
        )
        .await;
    Ok(ok(updated))
}

/// Delete a staff member
pub async fn remove(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = state.staff.delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Staff {} not found", id)));
    }
    state
        .audit
        .log(
            "delete",
            RESOURCE,
            id,
            Some(admin.subject),
            serde_json::Value::Null,
        )
        .await;
    Ok(ok(true))
}
