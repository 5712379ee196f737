//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 管理员登录
//! - [`food_items`] - 菜单项管理接口
//! - [`bookings`] - 预订、付款与人员指派接口
//! - [`staff`] - 员工管理接口
//! - [`staff_requests`] - 指派确认页接口（token 访问）
//! - [`company_info`] - 公司信息接口
//! - [`reviews`] - 客户评价接口
//! - [`notifications`] - 管理员通知接口
//! - [`audit_history`] - 审计历史接口
//!
//! 所有端点返回统一信封 [`crate::utils::AppResponse`]。

pub mod auth;
pub mod health;

pub mod audit_history;
pub mod bookings;
pub mod company_info;
pub mod food_items;
pub mod notifications;
pub mod reviews;
pub mod staff;
pub mod staff_requests;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// 聚合全部资源路由
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(food_items::router())
        .merge(bookings::router())
        .merge(staff::router())
        .merge(staff_requests::router())
        .merge(company_info::router())
        .merge(reviews::router())
        .merge(notifications::router())
        .merge(audit_history::router())
}
