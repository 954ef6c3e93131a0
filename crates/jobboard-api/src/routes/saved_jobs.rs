//! 관심 공고 API 라우트 (구직자)
//!
//! - `GET /api/saved-jobs` - 내 관심 공고 목록
//! - `GET /api/saved-jobs/{id}` - 관심 공고 조회
//! - `DELETE /api/saved-jobs/{id}` - 관심 공고 삭제

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::CandidateAuth;
use crate::error::{ApiError, ApiErrorResponse, ApiResult};
use crate::repository::SavedJobRepository;
use crate::state::AppState;
use crate::types::{SavedJobResponse, SuccessResponse};
use crate::utils::IdPath;

/// 관심 공고 목록 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedJobListResponse {
    pub saved_jobs: Vec<SavedJobResponse>,
    pub total: usize,
}

/// 내 관심 공고 목록 (최신 저장 순)
#[utoipa::path(
    get,
    path = "/api/saved-jobs",
    tag = "saved-jobs",
    responses(
        (status = 200, description = "관심 공고 목록", body = SavedJobListResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "구직자 전용", body = ApiErrorResponse)
    )
)]
pub async fn list_saved_jobs(
    CandidateAuth(claims): CandidateAuth,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SavedJobListResponse>> {
    let saved = SavedJobRepository::list_for_candidate(state.db()?, claims.user_id()).await?;
    let saved_jobs: Vec<SavedJobResponse> = saved.into_iter().map(Into::into).collect();

    Ok(Json(SavedJobListResponse {
        total: saved_jobs.len(),
        saved_jobs,
    }))
}

/// 관심 공고 조회
#[utoipa::path(
    get,
    path = "/api/saved-jobs/{id}",
    tag = "saved-jobs",
    params(("id" = Uuid, Path, description = "관심 공고 ID")),
    responses(
        (status = 200, description = "관심 공고", body = SavedJobResponse),
        (status = 404, description = "없거나 내 것이 아님", body = ApiErrorResponse)
    )
)]
pub async fn get_saved_job(
    CandidateAuth(claims): CandidateAuth,
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<Uuid>,
) -> ApiResult<Json<SavedJobResponse>> {
    let saved = SavedJobRepository::find_for_candidate(state.db()?, id, claims.user_id())
        .await?
        .ok_or_else(|| ApiError::not_found("관심 공고를 찾을 수 없습니다"))?;

    Ok(Json(saved.into()))
}

/// 관심 공고 삭제
#[utoipa::path(
    delete,
    path = "/api/saved-jobs/{id}",
    tag = "saved-jobs",
    params(("id" = Uuid, Path, description = "관심 공고 ID")),
    responses(
        (status = 200, description = "삭제 완료", body = SuccessResponse),
        (status = 404, description = "없거나 내 것이 아님", body = ApiErrorResponse)
    )
)]
pub async fn delete_saved_job(
    CandidateAuth(claims): CandidateAuth,
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    let deleted = SavedJobRepository::delete_for_candidate(state.db()?, id, claims.user_id()).await?;
    if !deleted {
        return Err(ApiError::not_found("관심 공고를 찾을 수 없습니다"));
    }

    debug!(saved_job_id = %id, "관심 공고 삭제");
    Ok(Json(SuccessResponse::ok()))
}

/// 관심 공고 라우터 생성.
pub fn saved_jobs_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_saved_jobs))
        .route("/{id}", get(get_saved_job).delete(delete_saved_job))
}
