//! Customer Review API Handlers
//!
//! 提交是公开的；审核（approved 标记）和删除是管理员操作。

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::AdminUser;
use crate::core::ServerState;
use crate::db::models::{CustomerReview, ReviewCreate, ReviewUpdate};
use crate::utils::time::now_millis;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok};

const RESOURCE: &str = "review";

fn validate_rating(rating: i64) -> AppResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::validation("rating must be between 1 and 5"));
    }
    Ok(())
}

/// List all reviews, newest first
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<CustomerReview>>>> {
    Ok(ok(state.reviews.find_all().await?))
}

/// Submit a review (public; starts unapproved)
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ReviewCreate>,
) -> AppResult<Json<AppResponse<CustomerReview>>> {
    validate_required_text(&input.customer_name, "customerName", MAX_NAME_LEN)?;
    validate_required_text(&input.comment, "comment", MAX_NOTE_LEN)?;
    validate_rating(input.rating)?;

    let review = CustomerReview {
        id: None,
        customer_name: input.customer_name,
        rating: input.rating,
        comment: input.comment,
        approved: false,
        created_at: now_millis(),
    };
    Ok(ok(state.reviews.create(review).await?))
}

/// Moderate a review (admin)
pub async fn update(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(partial): Json<ReviewUpdate>,
) -> AppResult<Json<AppResponse<CustomerReview>>> {
    if let Some(rating) = partial.rating {
        validate_rating(rating)?;
    }

    let updated = state.reviews.merge(&id, partial).await?;
    state
        .audit
        .log(
            "update",
            RESOURCE,
            id,
            Some(admin.subject),
            serde_json::json!({ "approved": updated.approved }),
        )
        .await;
    Ok(ok(updated))
}

/// Delete a review (admin)
pub async fn remove(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = state.reviews.delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Review {} not found", id)));
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
