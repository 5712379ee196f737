//! Health API Handlers

use axum::Json;
use serde::Serialize;

use crate::utils::{AppResponse, ok};

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// 健康检查
pub async fn health() -> Json<AppResponse<HealthStatus>> {
    ok(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
