//! 인증 API 라우트
//!
//! # 엔드포인트
//!
//! - `POST /api/auth/signup` - 이메일/비밀번호 가입
//! - `POST /api/auth/login` - 이메일/비밀번호/역할 로그인
//! - `POST /api/auth/google` - Google ID 토큰 로그인 (필요 시 계정 생성)
//! - `GET /api/auth/me` - 현재 사용자 조회

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use jobboard_core::{normalize_email, AuthProvider, Role};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::{
    hash_password, validate_password_strength, verify_password, GoogleAuthError, JwtAuth,
    PasswordError,
};
use crate::error::{is_unique_violation, ApiError, ApiErrorResponse, ApiResult};
use crate::metrics::{record_login, record_signup};
use crate::repository::{NewUser, UserRecord, UserRepository};
use crate::state::AppState;
use crate::types::{AuthResponse, UserResponse};
use crate::utils::{non_blank, required_text, ValidatedJson};

// ================================================================================================
// Request Types
// ================================================================================================

/// 가입 요청
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "이름을 입력하세요"))]
    pub name: String,
    #[validate(email(message = "올바른 이메일 형식이 아닙니다"))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호를 입력하세요"))]
    pub password: String,
    /// candidate 또는 employer
    #[validate(required(message = "역할을 선택하세요"))]
    pub role: Option<Role>,
    /// 채용 담당자 필수
    #[validate(length(max = 200))]
    pub company_name: Option<String>,
}

/// 로그인 요청
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "올바른 이메일 형식이 아닙니다"))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호를 입력하세요"))]
    pub password: String,
    #[validate(required(message = "역할을 선택하세요"))]
    pub role: Option<Role>,
}

/// Google 로그인 요청
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    /// Google ID 토큰
    #[validate(length(min = 1, message = "Google 자격증명이 필요합니다"))]
    pub credential: String,
    /// 새 계정의 역할 (기본 candidate). 기존 계정이면 일치해야 합니다.
    pub role: Option<Role>,
    /// 새 채용 담당자 계정의 회사명
    #[validate(length(max = 200))]
    pub company_name: Option<String>,
}

// ================================================================================================
// Helpers
// ================================================================================================

/// 셀프 가입 가능한 역할과 회사명 조합을 검사합니다.
fn check_signup_role(role: Role, company_name: &Option<String>) -> ApiResult<()> {
    if !role.is_self_service() {
        return Err(ApiError::invalid_input("가입할 수 없는 역할입니다"));
    }
    if role == Role::Employer && company_name.is_none() {
        return Err(ApiError::invalid_input("채용 담당자는 회사명이 필요합니다"));
    }
    Ok(())
}

fn auth_response(
    state: &AppState,
    user: UserRecord,
    provider: AuthProvider,
    created: Option<bool>,
) -> ApiResult<AuthResponse> {
    let token = state.jwt.issue(user.id, &user.email, user.role(), provider)?;
    Ok(AuthResponse {
        user: UserResponse::from(user),
        token,
        created,
    })
}

/// 이메일 앞부분을 표시 이름으로 사용합니다.
fn name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

// ================================================================================================
// Handlers
// ================================================================================================

/// 이메일/비밀번호 가입
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "가입 성공", body = AuthResponse),
        (status = 400, description = "입력값 오류", body = ApiErrorResponse),
        (status = 409, description = "이미 사용 중인 이메일", body = ApiErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let role = req
        .role
        .ok_or_else(|| ApiError::invalid_input("역할을 선택하세요"))?;
    let name = required_text(&req.name).ok_or_else(|| ApiError::invalid_input("이름을 입력하세요"))?;
    let company_name = non_blank(req.company_name);
    check_signup_role(role, &company_name)?;
    validate_password_strength(&req.password).map_err(ApiError::invalid_input)?;

    let email = normalize_email(&req.email);
    let pool = state.db()?;

    // 역할과 무관하게 이메일은 하나의 계정에만 쓰입니다
    if UserRepository::find_by_email(pool, &email).await?.is_some() {
        return Err(ApiError::conflict("이미 사용 중인 이메일입니다"));
    }

    let password_hash = hash_password(&req.password)?;
    let user = UserRepository::create(
        pool,
        NewUser {
            name,
            email,
            password_hash: Some(password_hash),
            role,
            auth_provider: AuthProvider::Credentials,
            company_name: if role == Role::Employer { company_name } else { None },
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::conflict("이미 사용 중인 이메일입니다")
        } else {
            ApiError::Database(e)
        }
    })?;

    info!(user_id = %user.id, role = role.as_str(), "User signed up");
    record_signup(role.as_str(), AuthProvider::Credentials.as_str());

    let response = auth_response(&state, user, AuthProvider::Credentials, None)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// 이메일/비밀번호 로그인
///
/// 이메일과 역할이 모두 일치하는 계정이 없으면 404, 비밀번호가 틀리면 401입니다.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = AuthResponse),
        (status = 400, description = "입력값 오류", body = ApiErrorResponse),
        (status = 401, description = "비밀번호 불일치", body = ApiErrorResponse),
        (status = 404, description = "해당 역할의 계정 없음", body = ApiErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let role = req
        .role
        .ok_or_else(|| ApiError::invalid_input("역할을 선택하세요"))?;
    let email = normalize_email(&req.email);
    let pool = state.db()?;

    let Some(user) = UserRepository::find_by_email_and_role(pool, &email, role).await? else {
        record_login(role.as_str(), "not_found");
        return Err(ApiError::not_found("해당 역할로 가입된 계정이 없습니다"));
    };

    let Some(digest) = user.password_hash.as_deref() else {
        record_login(role.as_str(), "rejected");
        return Err(ApiError::Unauthorized(
            "Google 로그인으로 가입된 계정입니다".to_string(),
        ));
    };

    match verify_password(&req.password, digest) {
        Ok(()) => {}
        Err(PasswordError::VerificationFailed) => {
            record_login(role.as_str(), "rejected");
            return Err(ApiError::Unauthorized(
                "이메일 또는 비밀번호가 올바르지 않습니다".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    }

    record_login(role.as_str(), "success");
    let provider = user.provider();
    Ok(Json(auth_response(&state, user, provider, None)?))
}

/// Google ID 토큰 로그인
///
/// 같은 이메일의 계정이 있으면 로그인하고, 없으면 Google 계정으로 새로 만듭니다.
#[utoipa::path(
    post,
    path = "/api/auth/google",
    tag = "auth",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = AuthResponse),
        (status = 400, description = "입력값 오류", body = ApiErrorResponse),
        (status = 401, description = "유효하지 않은 Google 자격증명", body = ApiErrorResponse),
        (status = 409, description = "다른 역할로 가입된 이메일", body = ApiErrorResponse)
    )
)]
pub async fn google_login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<GoogleLoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let verifier = state
        .google_verifier
        .as_ref()
        .ok_or(GoogleAuthError::NotConfigured)?;
    let identity = verifier.verify(&req.credential).await.map_err(|e| {
        warn!(error = %e, "Google credential rejected");
        ApiError::from(e)
    })?;

    let email = normalize_email(&identity.email);
    let pool = state.db()?;

    if let Some(user) = UserRepository::find_by_email(pool, &email).await? {
        if req.role.is_some_and(|role| role != user.role()) {
            return Err(ApiError::conflict("다른 역할로 가입된 이메일입니다"));
        }
        record_login(user.role().as_str(), "success");
        return Ok(Json(auth_response(&state, user, AuthProvider::Google, Some(false))?));
    }

    let role = req.role.unwrap_or(Role::Candidate);
    let company_name = non_blank(req.company_name);
    check_signup_role(role, &company_name)?;

    let name = identity.name.unwrap_or_else(|| name_from_email(&email));
    let user = UserRepository::create(
        pool,
        NewUser {
            name,
            email,
            password_hash: None,
            role,
            auth_provider: AuthProvider::Google,
            company_name: if role == Role::Employer { company_name } else { None },
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::conflict("이미 사용 중인 이메일입니다")
        } else {
            ApiError::Database(e)
        }
    })?;

    info!(user_id = %user.id, role = role.as_str(), "User signed up with Google");
    record_signup(role.as_str(), AuthProvider::Google.as_str());

    Ok(Json(auth_response(&state, user, AuthProvider::Google, Some(true))?))
}

/// 현재 사용자 조회
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "사용자 정보", body = UserResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 404, description = "삭제된 계정", body = ApiErrorResponse)
    )
)]
pub async fn me(
    JwtAuth(claims): JwtAuth,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<UserResponse>> {
    let pool = state.db()?;
    let user = UserRepository::find_by_id(pool, claims.user_id())
        .await?
        .ok_or_else(|| ApiError::not_found("사용자를 찾을 수 없습니다"))?;

    Ok(Json(user.into()))
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/google", post(google_login))
        .route("/me", get(me))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_signup_role() {
        assert!(check_signup_role(Role::Candidate, &None).is_ok());
        assert!(check_signup_role(Role::Employer, &Some("Acme".to_string())).is_ok());
        assert!(matches!(
            check_signup_role(Role::Employer, &None),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            check_signup_role(Role::Admin, &None),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_name_from_email() {
        assert_eq!(name_from_email("jane.doe@example.com"), "jane.doe");
    }

    #[test]
    fn test_signup_request_validation() {
        let req: SignupRequest = serde_json::from_value(serde_json::json!({
            "name": "Jane",
            "email": "not-an-email",
            "password": "password1",
            "role": "candidate"
        }))
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
        assert!(errors.field_errors().contains_key("email"));

        let req: SignupRequest = serde_json::from_value(serde_json::json!({
            "name": "Jane",
            "email": "jane@example.com",
            "password": "password1",
            "companyName": "Acme"
        }))
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role"));
    }
}
