//! 服务配置
//!
//! 全部来自环境变量（支持 .env）。缺少必填项时启动直接失败，
//! 绝不回退到内置默认凭据。

use anyhow::{Context, Result, bail};

#[derive(Debug, Clone)]
pub struct Config {
    /// 数据目录，RocksDB 存储与日志都落在这里
    pub data_dir: String,
    /// HTTP 监听端口
    pub http_port: u16,
    /// 管理员密码的 argon2 PHC 哈希
    pub admin_password_hash: String,
    /// JWT 签名密钥
    pub jwt_secret: String,
    /// JWT 有效期（分钟）
    pub jwt_expiration_minutes: i64,
    /// 日志文件目录，未设置则只输出到控制台
    pub log_dir: Option<String>,
    /// 日志级别
    pub log_level: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 必填: DATA_DIR, ADMIN_PASSWORD_HASH, JWT_SECRET
    /// 可选: HTTP_PORT (3000), JWT_EXPIRATION_MINUTES (720), LOG_DIR, RUST_LOG (info)
    pub fn from_env() -> Result<Self> {
        let data_dir =
            std::env::var("DATA_DIR").context("DATA_DIR environment variable is required")?;

        let admin_password_hash = std::env::var("ADMIN_PASSWORD_HASH")
            .context("ADMIN_PASSWORD_HASH environment variable is required")?;
        if !admin_password_hash.starts_with("$argon2") {
            bail!("ADMIN_PASSWORD_HASH must be an argon2 PHC string (use the hash-password tool)");
        }

        let jwt_secret =
            std::env::var("JWT_SECRET").context("JWT_SECRET environment variable is required")?;
        if jwt_secret.len() < 32 {
            bail!("JWT_SECRET must be at least 32 bytes");
        }

        let http_port = match std::env::var("HTTP_PORT") {
            Ok(v) => v.parse::<u16>().context("HTTP_PORT must be a valid port")?,
            Err(_) => 3000,
        };

        let jwt_expiration_minutes = match std::env::var("JWT_EXPIRATION_MINUTES") {
            Ok(v) => v
                .parse::<i64>()
                .context("JWT_EXPIRATION_MINUTES must be an integer")?,
            Err(_) => 720,
        };

        let log_dir = std::env::var("LOG_DIR").ok();
        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            data_dir,
            http_port,
            admin_password_hash,
            jwt_secret,
            jwt_expiration_minutes,
            log_dir,
            log_level,
        })
    }
}
