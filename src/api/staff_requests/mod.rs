//! Staff Request API Module
//!
//! 公开确认页：员工通过 token 链接查看并回应指派请求，
//! 无需登录 — token 本身即凭证。

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

/// Staff request router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/staff-requests", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/token/{token}", get(handler::resolve_token))
        .route("/{id}", patch(handler::respond))
}
