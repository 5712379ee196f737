//! Admin Auth Extractor
//!
//! 受保护 handler 声明一个 [`AdminUser`] 参数即可自动校验
//! Authorization 头里的 JWT。

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::JwtService;
use crate::core::ServerState;

/// 已通过校验的管理员会话
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub subject: String,
}

impl FromRequestParts<ServerState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted earlier in the request
        if let Some(user) = parts.extensions.get::<AdminUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                tracing::warn!(uri = %parts.uri, "Rejected request without credentials");
                return Err(AppError::unauthorized());
            }
        };

        let claims = state.jwt.validate_token(token)?;
        let user = AdminUser {
            subject: claims.sub,
        };

        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
