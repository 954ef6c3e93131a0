//! 지원서 API 라우트 (구직자)
//!
//! - `GET /api/applications` - 내 지원서 목록
//! - `GET /api/applications/{id}` - 지원서 조회
//! - `GET /api/applications/{id}/events` - 지원 이력
//! - `POST /api/applications/{id}/withdraw` - 지원 철회

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::CandidateAuth;
use crate::error::{ApiError, ApiErrorResponse, ApiResult};
use crate::metrics::record_application_status;
use crate::repository::{ApplicationRepository, TransitionOutcome};
use crate::state::AppState;
use crate::types::{ApplicationResponse, EventResponse};
use crate::utils::IdPath;

/// 지원서 목록 응답
#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationListResponse {
    pub applications: Vec<ApplicationResponse>,
    pub total: usize,
}

/// 지원 이력 응답
#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    pub events: Vec<EventResponse>,
}

fn not_found() -> ApiError {
    ApiError::not_found("지원서를 찾을 수 없습니다")
}

/// 내 지원서 목록 (최신 순)
#[utoipa::path(
    get,
    path = "/api/applications",
    tag = "applications",
    responses(
        (status = 200, description = "지원서 목록", body = ApplicationListResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "구직자 전용", body = ApiErrorResponse)
    )
)]
pub async fn list_applications(
    CandidateAuth(claims): CandidateAuth,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ApplicationListResponse>> {
    let records = ApplicationRepository::list_for_candidate(state.db()?, claims.user_id()).await?;
    let applications: Vec<ApplicationResponse> = records.into_iter().map(Into::into).collect();

    Ok(Json(ApplicationListResponse {
        total: applications.len(),
        applications,
    }))
}

/// 지원서 조회
#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    tag = "applications",
    params(("id" = Uuid, Path, description = "지원서 ID")),
    responses(
        (status = 200, description = "지원서", body = ApplicationResponse),
        (status = 404, description = "없거나 내 것이 아님", body = ApiErrorResponse)
    )
)]
pub async fn get_application(
    CandidateAuth(claims): CandidateAuth,
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<Uuid>,
) -> ApiResult<Json<ApplicationResponse>> {
    let record = ApplicationRepository::find_for_candidate(state.db()?, id, claims.user_id())
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(record.into()))
}

/// 지원 이력 (오래된 순)
#[utoipa::path(
    get,
    path = "/api/applications/{id}/events",
    tag = "applications",
    params(("id" = Uuid, Path, description = "지원서 ID")),
    responses(
        (status = 200, description = "지원 이력", body = EventListResponse),
        (status = 404, description = "없거나 내 것이 아님", body = ApiErrorResponse)
    )
)]
pub async fn list_application_events(
    CandidateAuth(claims): CandidateAuth,
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<Uuid>,
) -> ApiResult<Json<EventListResponse>> {
    let pool = state.db()?;
    ApplicationRepository::find_for_candidate(pool, id, claims.user_id())
        .await?
        .ok_or_else(not_found)?;

    let events = ApplicationRepository::list_events(pool, id).await?;
    Ok(Json(EventListResponse {
        events: events.into_iter().map(Into::into).collect(),
    }))
}

/// 지원 철회
///
/// 이미 종료된 지원서(철회/채용/불합격)는 철회할 수 없습니다.
#[utoipa::path(
    post,
    path = "/api/applications/{id}/withdraw",
    tag = "applications",
    params(("id" = Uuid, Path, description = "지원서 ID")),
    responses(
        (status = 200, description = "철회 완료", body = ApplicationResponse),
        (status = 404, description = "없거나 내 것이 아님", body = ApiErrorResponse),
        (status = 409, description = "이미 종료된 지원서", body = ApiErrorResponse)
    )
)]
pub async fn withdraw_application(
    CandidateAuth(claims): CandidateAuth,
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<Uuid>,
) -> ApiResult<Json<ApplicationResponse>> {
    let pool = state.db()?;
    let candidate_id = claims.user_id();

    match ApplicationRepository::withdraw(pool, id, candidate_id).await? {
        TransitionOutcome::Updated => {}
        TransitionOutcome::NotFound => return Err(not_found()),
        TransitionOutcome::Rejected(err) => return Err(err.into()),
    }

    info!(application_id = %id, candidate_id = %candidate_id, "Application withdrawn");
    record_application_status("withdrawn");

    let record = ApplicationRepository::find_for_candidate(pool, id, candidate_id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(record.into()))
}

/// 지원서 라우터 생성.
pub fn applications_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_applications))
        .route("/{id}", get(get_application))
        .route("/{id}/events", get(list_application_events))
        .route("/{id}/withdraw", post(withdraw_application))
}
