//! 预订领域 — 金额计算与付款生命周期
//!
//! - [`payment`] - 纯状态转换规则（可独立单测）
//! - [`BookingService`] - 持久化之上的实体服务

pub mod payment;
pub mod service;

pub use service::BookingService;
