//! Staff Request API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{RequestStatus, ResolvedRequest, StaffBookingRequest};
use crate::utils::{AppResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub status: RequestStatus,
}

/// Resolve a confirmation token into its request + booking + staff view
pub async fn resolve_token(
    State(state): State<ServerState>,
    Path(token): Path<String>,
) -> AppResult<Json<AppResponse<ResolvedRequest>>> {
    Ok(ok(state.assignments.resolve_by_token(&token).await?))
}

/// Accept or reject an assignment request
pub async fn respond(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RespondRequest>,
) -> AppResult<Json<AppResponse<StaffBookingRequest>>> {
    Ok(ok(state.assignments.respond(&id, payload.status).await?))
}
