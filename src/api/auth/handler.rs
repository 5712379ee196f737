//! Auth API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::verify_password;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// 管理员登录 — 校验 argon2 哈希后签发 JWT
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    if !verify_password(&state.config.admin_password_hash, &payload.password)? {
        tracing::warn!("Admin login attempt with wrong password");
        return Err(AppError::unauthorized());
    }

    let token = state.jwt.generate_admin_token()?;
    tracing::info!("Admin logged in");
    Ok(ok(LoginResponse { token }))
}
