//! Audit History API Module

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

/// Audit history router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/audit-history", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::query).post(handler::record))
        .route("/{id}", delete(handler::remove))
}
