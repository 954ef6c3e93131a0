//! 계정 API 라우트
//!
//! - `DELETE /api/account` - 내 계정 삭제 (지원서, 관심 공고 등은 FK CASCADE로 함께 삭제)

use axum::{extract::State, routing::delete, Json, Router};
use std::sync::Arc;
use tracing::info;

use crate::auth::JwtAuth;
use crate::error::{ApiError, ApiErrorResponse, ApiResult};
use crate::repository::UserRepository;
use crate::state::AppState;
use crate::types::SuccessResponse;

/// 내 계정 삭제
#[utoipa::path(
    delete,
    path = "/api/account",
    tag = "account",
    responses(
        (status = 200, description = "삭제 완료", body = SuccessResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 404, description = "이미 삭제된 계정", body = ApiErrorResponse)
    )
)]
pub async fn delete_account(
    JwtAuth(claims): JwtAuth,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SuccessResponse>> {
    let user_id = claims.user_id();
    if !UserRepository::delete(state.db()?, user_id).await? {
        return Err(ApiError::not_found("사용자를 찾을 수 없습니다"));
    }

    info!(user_id = %user_id, role = claims.role.as_str(), "Account deleted");
    Ok(Json(SuccessResponse::ok()))
}

/// 계정 라우터 생성.
pub fn account_router() -> Router<Arc<AppState>> {
    Router::new().route("/", delete(delete_account))
}
