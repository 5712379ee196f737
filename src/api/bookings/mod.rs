//! Booking API Module
//!
//! 预订 CRUD、菜单项选择、两阶段付款与人员指派都挂在
//! `/api/bookings` 下。

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

/// Booking router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bookings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get)
                .patch(handler::update)
                .delete(handler::remove),
        )
        .route("/{id}/items", get(handler::get_items).post(handler::set_items))
        .route("/{id}/payments/{phase}", post(handler::submit_payment))
        .route(
            "/{id}/payments/{phase}/approve",
            post(handler::approve_payment),
        )
        .route("/{id}/assigned-staff", get(handler::assigned_staff))
        .route("/{id}/accepted-staff", get(handler::accepted_staff))
        .route("/{id}/assign-staff", post(handler::assign_staff))
        .route("/{id}/request-staff", post(handler::request_staff))
        .route("/{id}/staff/{staff_id}", delete(handler::unassign_staff))
}
