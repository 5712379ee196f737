//! Booking API Handlers
//!
//! 客户侧端点（创建、查询、选菜、上传付款截图）不需要登录；
//! 管理端（列表、修改、删除、审批、指派）要求 [`AdminUser`]。

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::auth::AdminUser;
use crate::core::ServerState;
use crate::db::models::{
    AssignedStaffView, Booking, BookingCreate, BookingItem, BookingItemInput, BookingUpdate,
    PaymentPhase, Staff, StaffBookingRequest,
};
use crate::db::normalize::normalize;
use crate::utils::{AppError, AppResponse, AppResult, ok};

const RESOURCE: &str = "booking";

/// 付款截图上限（base64 字符数，约 2MB）
const MAX_SCREENSHOT_LEN: usize = 2 * 1024 * 1024;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSubmission {
    pub screenshot: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffSelection {
    pub staff_id: String,
}

fn parse_phase(raw: &str) -> AppResult<PaymentPhase> {
    raw.parse::<PaymentPhase>().map_err(AppError::validation)
}

/// List all bookings (admin)
pub async fn list(
    State(state): State<ServerState>,
    _admin: AdminUser,
) -> AppResult<Json<AppResponse<Vec<Booking>>>> {
    Ok(ok(state.bookings.list().await?))
}

/// Get one booking
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Booking>>> {
    Ok(ok(state.bookings.get(&id).await?))
}

/// Create a booking (public — customers book without an account)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<Json<AppResponse<Booking>>> {
    let input: BookingCreate = serde_json::from_value(normalize(payload))
        .map_err(|e| AppError::validation(format!("Invalid booking payload: {e}")))?;
    Ok(ok(state.bookings.create(input).await?))
}

/// Update a booking (admin, shallow merge)
pub async fn update(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<Json<AppResponse<Booking>>> {
    let partial: BookingUpdate = serde_json::from_value(normalize(payload))
        .map_err(|e| AppError::validation(format!("Invalid booking payload: {e}")))?;

    let updated = state.bookings.update(&id, partial).await?;
    state
        .audit
        .log(
            "update",
            RESOURCE,
            id,
            Some(admin.subject),
            serde_json::json!({ "clientName": &updated.client_name }),
        )
        .await;
    Ok(ok(updated))
}

/// Delete a booking and its dependents (admin)
pub async fn remove(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = state.bookings.delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Booking {} not found", id)));
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

// ── Menu selection ──────────────────────────────────────────────────

/// Get the booking's selected menu items
pub async fn get_items(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Vec<BookingItem>>>> {
    Ok(ok(state.bookings.get_items(&id).await?))
}

/// Replace the booking's menu selection with the submitted list
pub async fn set_items(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(inputs): Json<Vec<BookingItemInput>>,
) -> AppResult<Json<AppResponse<Vec<BookingItem>>>> {
    Ok(ok(state.bookings.set_items(&id, inputs).await?))
}

// ── Payment lifecycle ───────────────────────────────────────────────

/// Customer submits a payment screenshot for one phase
pub async fn submit_payment(
    State(state): State<ServerState>,
    Path((id, phase)): Path<(String, String)>,
    Json(payload): Json<PaymentSubmission>,
) -> AppResult<Json<AppResponse<Booking>>> {
    let phase = parse_phase(&phase)?;
    if payload.screenshot.trim().is_empty() {
        return Err(AppError::validation("screenshot must not be empty"));
    }
    if payload.screenshot.len() > MAX_SCREENSHOT_LEN {
        return Err(AppError::validation("screenshot payload is too large"));
    }
    Ok(ok(state
        .bookings
        .record_customer_payment(&id, phase, payload.screenshot)
        .await?))
}

/// Admin approves a payment phase (idempotent)
pub async fn approve_payment(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path((id, phase)): Path<(String, String)>,
) -> AppResult<Json<AppResponse<Booking>>> {
    let phase = parse_phase(&phase)?;
    let booking = state.bookings.approve_payment(&id, phase).await?;
    state
        .audit
        .log(
            "approve_payment",
            RESOURCE,
            id,
            Some(admin.subject),
            serde_json::json!({ "phase": phase.to_string() }),
        )
        .await;
    Ok(ok(booking))
}

// ── Staff assignment ────────────────────────────────────────────────

/// Everyone who was asked for this booking, with per-request status (admin)
pub async fn assigned_staff(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Vec<AssignedStaffView>>>> {
    Ok(ok(state.assignments.list_requests(&id).await?))
}

/// The confirmed roster: accepted staff only (admin)
pub async fn accepted_staff(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Vec<Staff>>>> {
    Ok(ok(state.assignments.list_accepted(&id).await?))
}

/// Direct assignment — immediately accepted (admin)
pub async fn assign_staff(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<StaffSelection>,
) -> AppResult<Json<AppResponse<StaffBookingRequest>>> {
    let request = state.assignments.assign_direct(&id, &payload.staff_id).await?;
    state
        .audit
        .log(
            "assign_staff",
            RESOURCE,
            id,
            Some(admin.subject),
            serde_json::json!({ "staffId": &payload.staff_id }),
        )
        .await;
    Ok(ok(request))
}

/// Ask a staff member to confirm via their token link (admin)
pub async fn request_staff(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<StaffSelection>,
) -> AppResult<Json<AppResponse<StaffBookingRequest>>> {
    let request = state
        .assignments
        .request_assignment(&id, &payload.staff_id)
        .await?;
    state
        .audit
        .log(
            "request_staff",
            RESOURCE,
            id,
            Some(admin.subject),
            serde_json::json!({ "staffId": &payload.staff_id }),
        )
        .await;
    Ok(ok(request))
}

/// Remove a staff member from a booking (admin, hard delete)
pub async fn unassign_staff(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path((id, staff_id)): Path<(String, String)>,
) -> AppResult<Json<AppResponse<bool>>> {
    let removed = state.assignments.unassign(&id, &staff_id).await?;
    if !removed {
        return Err(AppError::not_found(format!(
            "Staff {} is not assigned to booking {}",
            staff_id, id
        )));
    }
    state
        .audit
        .log(
            "unassign_staff",
            RESOURCE,
            id,
            Some(admin.subject),
            serde_json::json!({ "staffId": &staff_id }),
        )
        .await;
    Ok(ok(true))
}
