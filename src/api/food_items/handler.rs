//! Food Item API Handlers
//!
//! 写入端点接收宽松 JSON，先走 [`normalize`] 再反序列化，
//! 兼容旧前端的 snake_case / 别名字段。

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::AdminUser;
use crate::core::ServerState;
use crate::db::models::{FoodItem, FoodItemCreate, FoodItemUpdate};
use crate::db::normalize::normalize;
use crate::utils::time::now_millis;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok};

const RESOURCE: &str = "food_item";

/// List all food items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<FoodItem>>>> {
    Ok(ok(state.food_items.find_all().await?))
}

/// Get one food item
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<FoodItem>>> {
    let item = state
        .food_items
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Food item {} not found", id)))?;
    Ok(ok(item))
}

/// Create a food item (admin)
pub async fn create(
    State(state): State<ServerState>,
    admin: AdminUser,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<Json<AppResponse<FoodItem>>> {
    let input: FoodItemCreate = serde_json::from_value(normalize(payload))
        .map_err(|e| AppError::validation(format!("Invalid food item payload: {e}")))?;

    validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&input.category, "category", MAX_NAME_LEN)?;
    validate_optional_text(&input.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&input.image_url, "imageUrl", MAX_URL_LEN)?;

    let item = FoodItem {
        id: None,
        name: input.name,
        description: input.description,
        category: input.category,
        diet_type: input.diet_type,
        image_url: input.image_url,
        dietary_tags: input.dietary_tags,
        created_at: now_millis(),
    };

    let created = state.food_items.create(item).await?;
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

/// Update a food item (admin)
pub async fn update(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<Json<AppResponse<FoodItem>>> {
    let partial: FoodItemUpdate = serde_json::from_value(normalize(payload))
        .map_err(|e| AppError::validation(format!("Invalid food item payload: {e}")))?;

    if let Some(name) = &partial.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }

    let updated = state.food_items.merge(&id, partial).await?;
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

/// Delete a food item (admin)
pub async fn remove(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = state.food_items.delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Food item {} not found", id)));
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
