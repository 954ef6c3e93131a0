//! Axum용 인증 가드.
//!
//! 모든 보호 라우트는 [`authorize`] 하나를 거칩니다:
//!
//! 1. `Authorization` 헤더 없음 → 401 `MISSING_TOKEN`
//! 2. `Bearer <token>` 형식 아님 → 401 `INVALID_AUTH_HEADER`
//! 3. 토큰 검증 실패 (만료/변조 구분 없음) → 401 `INVALID_TOKEN`
//! 4. 요구 역할과 불일치 → 403 `INSUFFICIENT_PERMISSION`
//!
//! 서명된 Claims를 그대로 신뢰하며, 가드 단계에서 사용자 행을 다시 읽지 않습니다.
//! 역할 비교는 정확히 일치해야 하며 `admin`도 다른 역할 라우트에 접근할 수 없습니다.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use jobboard_core::Role;

use super::{Claims, JwtConfig};
use crate::error::ApiErrorResponse;

/// 인증 에러.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum JwtAuthError {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
    #[error("권한이 부족합니다")]
    InsufficientPermission,
}

impl JwtAuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            JwtAuthError::InsufficientPermission => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            JwtAuthError::MissingToken => "MISSING_TOKEN",
            JwtAuthError::InvalidAuthHeader => "INVALID_AUTH_HEADER",
            JwtAuthError::InvalidToken => "INVALID_TOKEN",
            JwtAuthError::InsufficientPermission => "INSUFFICIENT_PERMISSION",
        }
    }
}

impl IntoResponse for JwtAuthError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorResponse::new(self.code(), self.to_string()));
        (self.status(), body).into_response()
    }
}

/// 헤더에서 Bearer 토큰을 꺼냅니다.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, JwtAuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(JwtAuthError::MissingToken)?
        .to_str()
        .map_err(|_| JwtAuthError::InvalidAuthHeader)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(JwtAuthError::InvalidAuthHeader)
}

/// 요청 헤더를 검증하고 Claims를 반환합니다.
///
/// `required`가 `Some(role)`이면 Claims의 역할이 정확히 일치해야 합니다.
pub fn authorize(
    headers: &HeaderMap,
    jwt: &JwtConfig,
    required: Option<Role>,
) -> Result<Claims, JwtAuthError> {
    let token = bearer_token(headers)?;
    let claims = jwt.verify(token).ok_or(JwtAuthError::InvalidToken)?;

    if let Some(role) = required {
        require_role(role, &claims)?;
    }

    Ok(claims)
}

/// 역할이 정확히 일치하는지 확인합니다.
pub fn require_role(required_role: Role, claims: &Claims) -> Result<(), JwtAuthError> {
    if claims.role == required_role {
        Ok(())
    } else {
        Err(JwtAuthError::InsufficientPermission)
    }
}

/// JWT 인증 추출기 (역할 무관).
///
/// ```rust,ignore
/// async fn me(JwtAuth(claims): JwtAuth) -> impl IntoResponse {
///     format!("user {}", claims.sub)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JwtAuth(pub Claims);

impl<S> FromRequestParts<S> for JwtAuth
where
    JwtConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jwt = JwtConfig::from_ref(state);
        authorize(&parts.headers, &jwt, None).map(JwtAuth)
    }
}

/// 선택적 JWT 인증 추출기.
///
/// 토큰이 없거나 유효하지 않으면 `None`. 공개 API에서 로그인 여부에 따라
/// 응답을 달리할 때 사용합니다.
#[derive(Debug, Clone)]
pub struct OptionalJwtAuth(pub Option<Claims>);

impl<S> FromRequestParts<S> for OptionalJwtAuth
where
    JwtConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jwt = JwtConfig::from_ref(state);
        Ok(OptionalJwtAuth(authorize(&parts.headers, &jwt, None).ok()))
    }
}

/// 구직자 권한을 요구하는 추출기.
#[derive(Debug, Clone)]
pub struct CandidateAuth(pub Claims);

impl<S> FromRequestParts<S> for CandidateAuth
where
    JwtConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jwt = JwtConfig::from_ref(state);
        authorize(&parts.headers, &jwt, Some(Role::Candidate)).map(CandidateAuth)
    }
}

/// 채용 담당자 권한을 요구하는 추출기.
#[derive(Debug, Clone)]
pub struct EmployerAuth(pub Claims);

impl<S> FromRequestParts<S> for EmployerAuth
where
    JwtConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jwt = JwtConfig::from_ref(state);
        authorize(&parts.headers, &jwt, Some(Role::Employer)).map(EmployerAuth)
    }
}

/// Admin 권한을 요구하는 추출기.
#[derive(Debug, Clone)]
pub struct AdminAuth(pub Claims);

impl<S> FromRequestParts<S> for AdminAuth
where
    JwtConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jwt = JwtConfig::from_ref(state);
        authorize(&parts.headers, &jwt, Some(Role::Admin)).map(AdminAuth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jobboard_core::AuthProvider;
    use uuid::Uuid;

    const SECRET: &str = "guard-test-secret";

    fn jwt() -> JwtConfig {
        JwtConfig::new(SECRET)
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn token_for(role: Role) -> String {
        jwt()
            .issue(Uuid::new_v4(), "user@example.com", role, AuthProvider::Credentials)
            .unwrap()
    }

    #[test]
    fn test_missing_header() {
        let err = authorize(&HeaderMap::new(), &jwt(), None).unwrap_err();
        assert_eq!(err, JwtAuthError::MissingToken);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_non_bearer_header() {
        let err = authorize(&headers_with("Basic dXNlcjpwYXNz"), &jwt(), None).unwrap_err();
        assert_eq!(err, JwtAuthError::InvalidAuthHeader);

        let err = authorize(&headers_with("Bearer "), &jwt(), None).unwrap_err();
        assert_eq!(err, JwtAuthError::InvalidAuthHeader);
    }

    #[test]
    fn test_invalid_token() {
        let err = authorize(&headers_with("Bearer not.a.jwt"), &jwt(), None).unwrap_err();
        assert_eq!(err, JwtAuthError::InvalidToken);

        let foreign = JwtConfig::new("some-other-secret")
            .issue(Uuid::new_v4(), "x@example.com", Role::Candidate, AuthProvider::Credentials)
            .unwrap();
        let err = authorize(&headers_with(&format!("Bearer {}", foreign)), &jwt(), None)
            .unwrap_err();
        assert_eq!(err, JwtAuthError::InvalidToken);
    }

    #[test]
    fn test_role_requirement_is_exact() {
        let candidate = headers_with(&format!("Bearer {}", token_for(Role::Candidate)));
        let admin = headers_with(&format!("Bearer {}", token_for(Role::Admin)));

        assert!(authorize(&candidate, &jwt(), Some(Role::Candidate)).is_ok());
        assert_eq!(
            authorize(&candidate, &jwt(), Some(Role::Employer)).unwrap_err(),
            JwtAuthError::InsufficientPermission
        );
        assert_eq!(
            authorize(&admin, &jwt(), Some(Role::Candidate)).unwrap_err(),
            JwtAuthError::InsufficientPermission
        );
        assert!(authorize(&admin, &jwt(), None).is_ok());
    }

    #[test]
    fn test_error_codes() {
        for (error, status) in [
            (JwtAuthError::MissingToken, StatusCode::UNAUTHORIZED),
            (JwtAuthError::InvalidAuthHeader, StatusCode::UNAUTHORIZED),
            (JwtAuthError::InvalidToken, StatusCode::UNAUTHORIZED),
            (JwtAuthError::InsufficientPermission, StatusCode::FORBIDDEN),
        ] {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
