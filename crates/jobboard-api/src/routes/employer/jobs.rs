//! 채용 담당자 공고 관리
//!
//! 공고는 draft로 만들고 게시(published)와 마감(closed)으로 상태를 바꿉니다.
//! 처음 게시될 때 `publishedAt`이 기록되고 이후 재게시해도 바뀌지 않습니다.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use jobboard_core::{validate_salary_range, EmploymentType, JobStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::auth::EmployerAuth;
use crate::error::{ApiError, ApiErrorResponse, ApiResult};
use crate::repository::{JobRepository, NewJob};
use crate::state::AppState;
use crate::types::EmployerJobResponse;
use crate::utils::{non_blank, required_text, IdPath, ValidatedJson};

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 공고 생성 요청
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[validate(length(min = 1, max = 200, message = "제목을 입력하세요"))]
    pub title: String,
    #[validate(length(max = 20000))]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub remote: bool,
    /// 기본 full_time
    pub employment_type: Option<EmploymentType>,
    #[validate(range(min = 0))]
    pub salary_min: Option<i32>,
    #[validate(range(min = 0))]
    pub salary_max: Option<i32>,
    #[validate(length(min = 3, max = 3, message = "통화 코드는 3자리입니다"))]
    pub salary_currency: Option<String>,
    /// true면 바로 게시
    pub publish: bool,
}

/// 공고 상태 변경 요청
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateJobRequest {
    #[validate(required(message = "상태를 지정하세요"))]
    pub status: Option<JobStatus>,
}

/// 내 공고 목록 응답
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployerJobListResponse {
    pub jobs: Vec<EmployerJobResponse>,
    pub total: usize,
}

fn not_found() -> ApiError {
    ApiError::not_found("공고를 찾을 수 없습니다")
}

impl CreateJobRequest {
    fn into_new_job(self, employer_id: Uuid) -> ApiResult<NewJob> {
        let title =
            required_text(&self.title).ok_or_else(|| ApiError::invalid_input("제목을 입력하세요"))?;
        validate_salary_range(self.salary_min, self.salary_max).map_err(ApiError::invalid_input)?;

        Ok(NewJob {
            employer_id,
            title,
            description: non_blank(self.description),
            location: non_blank(self.location),
            remote: self.remote,
            employment_type: self.employment_type.unwrap_or(EmploymentType::FullTime),
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            salary_currency: non_blank(self.salary_currency).map(|c| c.to_ascii_uppercase()),
            status: if self.publish {
                JobStatus::Published
            } else {
                JobStatus::Draft
            },
        })
    }
}

// ================================================================================================
// Handlers
// ================================================================================================

/// 내 공고 목록 (지원자 수 포함, 최신 순)
#[utoipa::path(
    get,
    path = "/api/employer/jobs",
    tag = "employer",
    responses(
        (status = 200, description = "공고 목록", body = EmployerJobListResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "채용 담당자 전용", body = ApiErrorResponse)
    )
)]
pub async fn list_jobs(
    EmployerAuth(claims): EmployerAuth,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<EmployerJobListResponse>> {
    let records = JobRepository::list_by_employer(state.db()?, claims.user_id()).await?;
    let jobs: Vec<EmployerJobResponse> = records.into_iter().map(Into::into).collect();

    Ok(Json(EmployerJobListResponse {
        total: jobs.len(),
        jobs,
    }))
}

/// 공고 생성
#[utoipa::path(
    post,
    path = "/api/employer/jobs",
    tag = "employer",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "생성된 공고", body = EmployerJobResponse),
        (status = 400, description = "입력값 오류", body = ApiErrorResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "채용 담당자 전용", body = ApiErrorResponse)
    )
)]
pub async fn create_job(
    EmployerAuth(claims): EmployerAuth,
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateJobRequest>,
) -> ApiResult<(StatusCode, Json<EmployerJobResponse>)> {
    let new_job = req.into_new_job(claims.user_id())?;
    let job = JobRepository::create(state.db()?, new_job).await?;

    info!(job_id = %job.id, slug = %job.slug, status = %job.status, "Job created");
    Ok((StatusCode::CREATED, Json(job.into())))
}

/// 내 공고 조회
#[utoipa::path(
    get,
    path = "/api/employer/jobs/{id}",
    tag = "employer",
    params(("id" = Uuid, Path, description = "공고 ID")),
    responses(
        (status = 200, description = "공고", body = EmployerJobResponse),
        (status = 404, description = "없거나 내 공고가 아님", body = ApiErrorResponse)
    )
)]
pub async fn get_job(
    EmployerAuth(claims): EmployerAuth,
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<Uuid>,
) -> ApiResult<Json<EmployerJobResponse>> {
    let job = JobRepository::find_for_employer(state.db()?, id, claims.user_id())
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(job.into()))
}

/// 공고 상태 변경
#[utoipa::path(
    patch,
    path = "/api/employer/jobs/{id}",
    tag = "employer",
    params(("id" = Uuid, Path, description = "공고 ID")),
    request_body = UpdateJobRequest,
    responses(
        (status = 200, description = "변경된 공고", body = EmployerJobResponse),
        (status = 400, description = "입력값 오류", body = ApiErrorResponse),
        (status = 404, description = "없거나 내 공고가 아님", body = ApiErrorResponse)
    )
)]
pub async fn update_job(
    EmployerAuth(claims): EmployerAuth,
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateJobRequest>,
) -> ApiResult<Json<EmployerJobResponse>> {
    let status = req
        .status
        .ok_or_else(|| ApiError::invalid_input("상태를 지정하세요"))?;
    let pool = state.db()?;
    let employer_id = claims.user_id();

    JobRepository::update_status(pool, id, employer_id, status)
        .await?
        .ok_or_else(not_found)?;
    info!(job_id = %id, status = status.as_str(), "Job status changed");

    let job = JobRepository::find_for_employer(pool, id, employer_id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(job.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_new_job_defaults() {
        let req = CreateJobRequest {
            title: "  Rust Engineer ".to_string(),
            salary_currency: Some("krw".to_string()),
            ..Default::default()
        };
        let job = req.into_new_job(Uuid::new_v4()).unwrap();
        assert_eq!(job.title, "Rust Engineer");
        assert_eq!(job.status, JobStatus::Draft);
        assert_eq!(job.employment_type, EmploymentType::FullTime);
        assert_eq!(job.salary_currency.as_deref(), Some("KRW"));
    }

    #[test]
    fn test_into_new_job_publish_and_salary_check() {
        let req = CreateJobRequest {
            title: "Backend".to_string(),
            publish: true,
            ..Default::default()
        };
        assert_eq!(
            req.into_new_job(Uuid::new_v4()).unwrap().status,
            JobStatus::Published
        );

        let req = CreateJobRequest {
            title: "Backend".to_string(),
            salary_min: Some(9000),
            salary_max: Some(100),
            ..Default::default()
        };
        assert!(matches!(
            req.into_new_job(Uuid::new_v4()),
            Err(ApiError::InvalidInput(_))
        ));
    }
}
