//! 员工指派领域 — tokenized 请求/确认工作流

pub mod service;

pub use service::AssignmentService;
