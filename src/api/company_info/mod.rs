//! Company Info API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Company info router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/company-info", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::get).patch(handler::update))
}
