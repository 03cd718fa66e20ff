use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::header::{AUTHORIZATION, COOKIE},
    http::request::Parts,
};

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::decode_access_token;

/// 관리자 인증용 쿠키 이름
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// 현재 요청을 보낸 사용자
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
}

/// 현재 사용자 식별 인터페이스
///
/// 로그인/계정 관리는 외부 시스템이 담당하며, 서버는 요청에서 사용자를 식별하는 능력만 필요합니다.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn identify(&self, parts: &Parts) -> Result<CurrentUser, AppError>;
}

/// HS256 JWT 기반 인증기
///
/// `Authorization: Bearer <token>` 헤더를 우선 확인하고, 없으면 `access_token` 쿠키를 확인합니다.
pub struct JwtAuthenticator {
    secret: String,
}

impl JwtAuthenticator {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn shared(secret: impl Into<String>) -> Arc<dyn Authenticator> {
        Arc::new(Self::new(secret))
    }
}

#[async_trait]
impl Authenticator for JwtAuthenticator {
    async fn identify(&self, parts: &Parts) -> Result<CurrentUser, AppError> {
        let token = extract_token(parts)?;
        let claims = decode_access_token(&token, &self.secret)?;

        if claims.sub.is_empty() {
            return Err(AppError::unauthorized("유효하지 않은 사용자 ID입니다."));
        }

        Ok(CurrentUser { id: claims.sub })
    }
}

/// 인증된 관리자 Extractor
pub struct AdminUser(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = state.authenticator.identify(parts).await?;
        tracing::debug!(user_id = %user.id, "관리자 인증 성공");
        Ok(AdminUser(user))
    }
}

fn extract_token(parts: &Parts) -> Result<String, AppError> {
    if let Some(auth_header) = parts.headers.get(AUTHORIZATION) {
        let auth_header_str = auth_header
            .to_str()
            .map_err(|_| AppError::unauthorized("잘못된 헤더 형식입니다."))?;

        return auth_header_str
            .strip_prefix("Bearer ")
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::unauthorized("토큰 형식이 올바르지 않습니다."));
    }

    extract_token_from_cookie(parts)
}

/// 쿠키에서 access_token 추출
fn extract_token_from_cookie(parts: &Parts) -> Result<String, AppError> {
    let cookie_header = parts
        .headers
        .get(COOKIE)
        .ok_or_else(|| AppError::unauthorized("로그인이 필요합니다."))?;

    let cookie_str = cookie_header
        .to_str()
        .map_err(|_| AppError::unauthorized("잘못된 쿠키 형식입니다."))?;

    // "name1=value1; name2=value2" 형식
    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(&format!("{}=", ACCESS_TOKEN_COOKIE)) {
            if !value.is_empty() {
                return Ok(value.to_string());
            }
        }
    }

    Err(AppError::unauthorized("로그인이 필요합니다."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::encode_token;
    use axum::http::Request;

    fn parts_with_header(name: &str, value: &str) -> Parts {
        let (parts, _) = Request::builder()
            .header(name, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[tokio::test]
    async fn should_identify_user_from_bearer_header() {
        // Arrange
        let token = encode_token("admin".into(), "secret", 600).unwrap();
        let parts = parts_with_header("authorization", &format!("Bearer {}", token));

        // Act
        let user = JwtAuthenticator::new("secret").identify(&parts).await;

        // Assert
        assert_eq!(user.unwrap().id, "admin");
    }

    #[tokio::test]
    async fn should_identify_user_from_cookie() {
        let token = encode_token("admin".into(), "secret", 600).unwrap();
        let parts = parts_with_header("cookie", &format!("flash=abc; access_token={}", token));

        let user = JwtAuthenticator::new("secret").identify(&parts).await;

        assert_eq!(user.unwrap().id, "admin");
    }

    #[tokio::test]
    async fn should_reject_non_bearer_scheme() {
        let parts = parts_with_header("authorization", "Basic abc");

        let result = JwtAuthenticator::new("secret").identify(&parts).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn should_reject_missing_credentials() {
        let (parts, _) = Request::builder().body(()).unwrap().into_parts();

        let result = JwtAuthenticator::new("secret").identify(&parts).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
