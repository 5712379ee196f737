//! Auth API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Admin auth router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/admin/login", post(handler::login))
}
