//! 채용공고 API 라우트
//!
//! # 엔드포인트
//!
//! - `GET /api/jobs` - 게시된 공고 목록 (검색/필터/페이지네이션)
//! - `GET /api/jobs/recommended` - 추천 공고
//! - `GET /api/jobs/{id}` - 공고 상세 (ID 또는 슬러그)
//! - `POST /api/jobs/{id}/apply` - 지원 (구직자)
//! - `POST /api/jobs/{id}/save` - 관심 공고 저장 (구직자)

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use jobboard_core::{parse_lenient_i64, EmploymentType, Pagination, Role};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{CandidateAuth, OptionalJwtAuth};
use crate::error::{is_unique_violation, ApiError, ApiErrorResponse, ApiResult};
use crate::metrics::record_application_status;
use crate::repository::{
    ApplicationRepository, JobFilter, JobRecord, JobRepository, SavedJobRepository,
};
use crate::state::AppState;
use crate::types::{ApplicationResponse, JobDetail, JobSummary, SavedJobResponse};
use crate::utils::{non_blank, IdPath};

/// 추천 공고 기본 개수
pub const DEFAULT_RECOMMENDED_LIMIT: i64 = 6;

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 공고 목록 쿼리
///
/// 숫자/불리언 값은 관대하게 해석하며, 해석할 수 없는 값은 무시합니다.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListJobsQuery {
    /// 제목/설명 검색어
    pub q: Option<String>,
    /// 근무지 검색어
    pub location: Option<String>,
    /// 원격 근무 여부 (true/false)
    pub remote: Option<String>,
    /// 고용 형태 (full_time, part_time, contract, internship, temporary)
    pub employment_type: Option<String>,
    /// 페이지 (1부터)
    pub page: Option<String>,
    /// 페이지 크기 (1..=50, 기본 20)
    pub limit: Option<String>,
}

/// 추천 공고 쿼리
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecommendedQuery {
    /// 최대 개수 (1..=50, 기본 6)
    pub limit: Option<String>,
}

/// 공고 목록 응답
#[derive(Debug, Serialize, ToSchema)]
pub struct JobListResponse {
    pub jobs: Vec<JobSummary>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// 추천 공고 응답
#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendedJobsResponse {
    pub jobs: Vec<JobSummary>,
}

/// 지원 요청 (본문 생략 가능)
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplyRequest {
    #[validate(length(max = 5000))]
    pub cover_letter: Option<String>,
}

fn parse_bool(raw: Option<&str>) -> Option<bool> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("true") | Some("1") | Some("yes") => Some(true),
        Some("false") | Some("0") | Some("no") => Some(false),
        _ => None,
    }
}

impl ListJobsQuery {
    fn filter(&self) -> ApiResult<JobFilter> {
        let employment_type = match non_blank(self.employment_type.clone()) {
            Some(raw) => Some(
                EmploymentType::parse(&raw)
                    .ok_or_else(|| ApiError::invalid_input("알 수 없는 고용 형태입니다"))?,
            ),
            None => None,
        };

        Ok(JobFilter {
            q: non_blank(self.q.clone()),
            location: non_blank(self.location.clone()),
            remote: parse_bool(self.remote.as_deref()),
            employment_type,
        })
    }

    fn pagination(&self) -> Pagination {
        Pagination::new(
            parse_lenient_i64(self.page.as_deref()),
            parse_lenient_i64(self.limit.as_deref()),
            Pagination::DEFAULT_LIMIT,
            Pagination::MAX_LIMIT,
        )
    }
}

/// 추천 개수 해석. 해석 실패 시 기본값, 범위는 `1..=50`.
fn recommended_limit(raw: Option<&str>) -> i64 {
    parse_lenient_i64(raw)
        .unwrap_or(DEFAULT_RECOMMENDED_LIMIT)
        .clamp(1, Pagination::MAX_LIMIT)
}

async fn existing_job(state: &AppState, id: Uuid) -> ApiResult<JobRecord> {
    JobRepository::find_by_id(state.db()?, id)
        .await?
        .ok_or_else(|| ApiError::not_found("공고를 찾을 수 없습니다"))
}

// ================================================================================================
// Handlers
// ================================================================================================

/// 게시된 공고 목록
#[utoipa::path(
    get,
    path = "/api/jobs",
    tag = "jobs",
    params(ListJobsQuery),
    responses(
        (status = 200, description = "공고 목록", body = JobListResponse),
        (status = 400, description = "잘못된 필터", body = ApiErrorResponse)
    )
)]
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListJobsQuery>,
) -> ApiResult<Json<JobListResponse>> {
    let filter = query.filter()?;
    let page = query.pagination();
    debug!(?filter, page = page.page, limit = page.limit, "공고 목록 조회");

    let (jobs, total) = JobRepository::list_published(state.db()?, &filter, page).await?;

    Ok(Json(JobListResponse {
        jobs: jobs.into_iter().map(JobSummary::from).collect(),
        total,
        page: page.page,
        limit: page.limit,
    }))
}

/// 추천 공고
///
/// 마감 공고를 제외하고, 게시된 공고를 먼저 최신순으로 보여줍니다.
#[utoipa::path(
    get,
    path = "/api/jobs/recommended",
    tag = "jobs",
    params(RecommendedQuery),
    responses((status = 200, description = "추천 공고", body = RecommendedJobsResponse))
)]
pub async fn recommended_jobs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecommendedQuery>,
) -> ApiResult<Json<RecommendedJobsResponse>> {
    let limit = recommended_limit(query.limit.as_deref());
    let jobs = JobRepository::recommended(state.db()?, limit).await?;

    Ok(Json(RecommendedJobsResponse {
        jobs: jobs.into_iter().map(JobSummary::from).collect(),
    }))
}

/// 공고 상세 (ID 또는 슬러그)
///
/// 구직자 토큰이 있으면 지원/저장 여부를 함께 돌려줍니다.
#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "공고 ID 또는 슬러그")),
    responses(
        (status = 200, description = "공고 상세", body = JobDetail),
        (status = 404, description = "공고 없음", body = ApiErrorResponse)
    )
)]
pub async fn get_job(
    OptionalJwtAuth(claims): OptionalJwtAuth,
    State(state): State<Arc<AppState>>,
    Path(id_or_slug): Path<String>,
) -> ApiResult<Json<JobDetail>> {
    let pool = state.db()?;
    let job = JobRepository::find_by_id_or_slug(pool, &id_or_slug)
        .await?
        .ok_or_else(|| ApiError::not_found("공고를 찾을 수 없습니다"))?;

    let (is_applied, is_saved) = match claims.filter(|c| c.role == Role::Candidate) {
        Some(claims) => {
            let candidate_id = claims.user_id();
            (
                ApplicationRepository::exists(pool, job.id, candidate_id).await?,
                SavedJobRepository::exists(pool, candidate_id, job.id).await?,
            )
        }
        None => (false, false),
    };

    Ok(Json(JobDetail::new(job, is_applied, is_saved)))
}

/// 공고 지원
///
/// 게시 중인 공고에만 지원할 수 있으며 같은 공고에 두 번 지원할 수 없습니다.
#[utoipa::path(
    post,
    path = "/api/jobs/{id}/apply",
    tag = "jobs",
    params(("id" = Uuid, Path, description = "공고 ID")),
    request_body(content = ApplyRequest, description = "생략 가능"),
    responses(
        (status = 201, description = "지원 완료", body = ApplicationResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "구직자 전용", body = ApiErrorResponse),
        (status = 404, description = "공고 없음", body = ApiErrorResponse),
        (status = 409, description = "이미 지원했거나 모집 중이 아님", body = ApiErrorResponse)
    )
)]
pub async fn apply_to_job(
    CandidateAuth(claims): CandidateAuth,
    State(state): State<Arc<AppState>>,
    IdPath(job_id): IdPath<Uuid>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ApplicationResponse>)> {
    let req: ApplyRequest = if body.iter().all(u8::is_ascii_whitespace) {
        ApplyRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::invalid_input(e.to_string()))?
    };
    req.validate()?;

    let candidate_id = claims.user_id();
    let job = existing_job(&state, job_id).await?;
    if !job.status().is_some_and(|s| s.accepts_applications()) {
        return Err(ApiError::conflict("모집 중인 공고가 아닙니다"));
    }

    let pool = state.db()?;
    let cover_letter = non_blank(req.cover_letter);
    let id = ApplicationRepository::create_with_event(
        pool,
        job.id,
        candidate_id,
        cover_letter.as_deref(),
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::conflict("이미 지원한 공고입니다")
        } else {
            ApiError::Database(e)
        }
    })?;

    info!(application_id = %id, job_id = %job.id, candidate_id = %candidate_id, "Application submitted");
    record_application_status("applied");

    let application = ApplicationRepository::find_for_candidate(pool, id, candidate_id)
        .await?
        .ok_or_else(|| ApiError::internal("생성한 지원서를 다시 읽지 못했습니다"))?;

    Ok((StatusCode::CREATED, Json(application.into())))
}

/// 관심 공고 저장
#[utoipa::path(
    post,
    path = "/api/jobs/{id}/save",
    tag = "jobs",
    params(("id" = Uuid, Path, description = "공고 ID")),
    responses(
        (status = 201, description = "저장 완료", body = SavedJobResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "구직자 전용", body = ApiErrorResponse),
        (status = 404, description = "공고 없음", body = ApiErrorResponse),
        (status = 409, description = "이미 저장한 공고", body = ApiErrorResponse)
    )
)]
pub async fn save_job(
    CandidateAuth(claims): CandidateAuth,
    State(state): State<Arc<AppState>>,
    IdPath(job_id): IdPath<Uuid>,
) -> ApiResult<(StatusCode, Json<SavedJobResponse>)> {
    let candidate_id = claims.user_id();
    let job = existing_job(&state, job_id).await?;
    let pool = state.db()?;

    let id = SavedJobRepository::create(pool, candidate_id, job.id)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("이미 저장한 공고입니다")
            } else {
                ApiError::Database(e)
            }
        })?;

    let saved = SavedJobRepository::find_for_candidate(pool, id, candidate_id)
        .await?
        .ok_or_else(|| ApiError::internal("저장한 공고를 다시 읽지 못했습니다"))?;

    Ok((StatusCode::CREATED, Json(saved.into())))
}

/// 채용공고 라우터 생성.
pub fn jobs_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_jobs))
        .route("/recommended", get(recommended_jobs))
        .route("/{id}", get(get_job))
        .route("/{id}/apply", post(apply_to_job))
        .route("/{id}/save", post(save_job))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommended_limit() {
        assert_eq!(recommended_limit(None), 6);
        assert_eq!(recommended_limit(Some("3")), 3);
        assert_eq!(recommended_limit(Some("abc")), 6);
        assert_eq!(recommended_limit(Some("0")), 1);
        assert_eq!(recommended_limit(Some("500")), 50);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool(Some("true")), Some(true));
        assert_eq!(parse_bool(Some("0")), Some(false));
        assert_eq!(parse_bool(Some("maybe")), None);
        assert_eq!(parse_bool(None), None);
    }

    #[test]
    fn test_list_query_filter() {
        let query = ListJobsQuery {
            q: Some("  rust ".to_string()),
            employment_type: Some("full-time".to_string()),
            remote: Some("yes".to_string()),
            page: Some("x".to_string()),
            limit: Some("100".to_string()),
            ..Default::default()
        };

        let filter = query.filter().unwrap();
        assert_eq!(filter.q.as_deref(), Some("rust"));
        assert_eq!(filter.employment_type, Some(EmploymentType::FullTime));
        assert_eq!(filter.remote, Some(true));
        assert!(filter.location.is_none());

        let page = query.pagination();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 50);
    }

    #[test]
    fn test_list_query_rejects_unknown_employment_type() {
        let query = ListJobsQuery {
            employment_type: Some("gig".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.filter(), Err(ApiError::InvalidInput(_))));
    }
}
