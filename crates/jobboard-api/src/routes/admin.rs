//! 관리자 API 라우트
//!
//! - `GET /api/admin/users` - 사용자 목록 (역할 필터, 페이지네이션)

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use jobboard_core::{parse_lenient_i64, Pagination, Role};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::auth::AdminAuth;
use crate::error::{ApiError, ApiErrorResponse, ApiResult};
use crate::repository::UserRepository;
use crate::state::AppState;
use crate::types::UserResponse;
use crate::utils::non_blank;

/// 사용자 목록 쿼리
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// candidate, employer, admin
    pub role: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// 사용자 목록 응답
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// 사용자 목록 (최신 가입 순)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "사용자 목록", body = UserListResponse),
        (status = 400, description = "알 수 없는 역할", body = ApiErrorResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "관리자 전용", body = ApiErrorResponse)
    )
)]
pub async fn list_users(
    AdminAuth(_claims): AdminAuth,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Json<UserListResponse>> {
    let role = match non_blank(query.role) {
        Some(raw) => {
            Some(Role::parse(&raw).ok_or_else(|| ApiError::invalid_input("알 수 없는 역할입니다"))?)
        }
        None => None,
    };
    let page = Pagination::new(
        parse_lenient_i64(query.page.as_deref()),
        parse_lenient_i64(query.limit.as_deref()),
        Pagination::DEFAULT_LIMIT,
        Pagination::MAX_LIMIT,
    );

    let (users, total) = UserRepository::list(state.db()?, role, page).await?;

    Ok(Json(UserListResponse {
        users: users.into_iter().map(Into::into).collect(),
        total,
        page: page.page,
        limit: page.limit,
    }))
}

/// 관리자 라우터 생성.
pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new().route("/users", get(list_users))
}
