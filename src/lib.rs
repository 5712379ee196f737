//! Catering Server - 餐饮业务管理后端
//!
//! # 架构概述
//!
//! 单体 HTTP 服务，嵌入式存储，为前台（客户预订）和
//! 管理端（单管理员）两套界面提供同一组 REST 接口：
//!
//! - **预订** (`booking`): 预订生命周期与两阶段付款（advance / final）
//! - **人员指派** (`assignment`): request / accept / reject 确认流程
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储与字段归一化
//! - **认证** (`auth`): JWT + Argon2 单管理员认证
//! - **审计** (`audit`): 管理端动作的 append-only 历史
//! - **HTTP API** (`api`): RESTful 接口，统一响应信封
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器生命周期
//! ├── auth/          # JWT 认证、密码哈希
//! ├── api/           # HTTP 路由和处理器
//! ├── booking/       # 预订与付款业务逻辑
//! ├── assignment/    # 人员指派工作流
//! ├── audit/         # 审计历史
//! ├── db/            # 数据库层（模型、仓储、归一化）
//! └── utils/         # 错误、日志、校验、时间
//! ```

pub mod api;
pub mod assignment;
pub mod audit;
pub mod auth;
pub mod booking;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use assignment::AssignmentService;
pub use audit::AuditService;
pub use auth::{AdminUser, JwtService};
pub use booking::BookingService;
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use utils::logger::init_logger;
pub use utils::{AppError, AppResponse, AppResult};
