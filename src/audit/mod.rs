//! 审计/通知汇 — 管理端动作与系统通知的 append-only 记录

pub mod service;
pub mod types;

pub use service::AuditService;
pub use types::{AuditEntry, AuditEntryCreate, AuditQuery};
