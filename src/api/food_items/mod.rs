//! Food Item API Module

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

/// Food item router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/food-items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            patch(handler::update)
                .get(handler::get)
                .delete(handler::remove),
        )
}
