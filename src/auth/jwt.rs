//! JWT 令牌服务
//!
//! 管理员登录成功后签发，受保护路由通过 [`crate::auth::AdminUser`]
//! 提取器校验。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::utils::{AppError, AppResult};

const ISSUER: &str = "catering-server";

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — 固定为 "admin"（单管理员系统）
    pub sub: String,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
}

/// JWT 服务
pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiration_minutes: i64,
}

impl JwtService {
    pub fn new(secret: &str, expiration_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiration_minutes,
        }
    }

    /// 签发管理员令牌
    pub fn generate_admin_token(&self) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: "admin".to_string(),
            exp: (now + Duration::minutes(self.expiration_minutes)).timestamp(),
            iat: now.timestamp(),
            iss: ISSUER.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// 校验令牌并返回 claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::token_expired(),
                _ => AppError::invalid_token(e.to_string()),
            })
    }

    /// 从 "Bearer <token>" 头里取出令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_validates() {
        let svc = JwtService::new("test-secret-at-least-32-bytes-long!!", 60);
        let token = svc.generate_admin_token().unwrap();
        let claims = svc.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.iss, ISSUER);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let svc = JwtService::new("test-secret-at-least-32-bytes-long!!", 60);
        let other = JwtService::new("another-secret-entirely-different!!!", 60);
        let token = svc.generate_admin_token().unwrap();
        assert!(matches!(
            other.validate_token(&token),
            Err(AppError::InvalidToken(_))
        ));
    }

    #[test]
    fn bearer_header_is_parsed() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
