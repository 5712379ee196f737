//! 认证模块 — argon2 密码校验 + JWT 管理员会话

pub mod extractor;
pub mod jwt;
pub mod password;

pub use extractor::AdminUser;
pub use jwt::{Claims, JwtService};
pub use password::{hash_password, verify_password};
