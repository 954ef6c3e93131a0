//! 채용 담당자 지원서 관리
//!
//! 지원서 소유권은 공고의 `employer_id`로 판단합니다. 상태 변경마다 이력 이벤트가 남습니다.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use jobboard_core::ApplicationStatus;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::auth::EmployerAuth;
use crate::error::{ApiError, ApiErrorResponse, ApiResult};
use crate::metrics::record_application_status;
use crate::repository::{
    ApplicationRepository, EmployerApplicationFilter, StatusUpdate, TransitionOutcome,
};
use crate::routes::applications::EventListResponse;
use crate::state::AppState;
use crate::types::ApplicationResponse;
use crate::utils::{non_blank, IdPath, ValidatedJson};

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 지원서 목록 필터
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmployerApplicationsQuery {
    /// 특정 공고만
    pub job_id: Option<String>,
    /// 특정 상태만
    pub status: Option<String>,
}

impl EmployerApplicationsQuery {
    fn filter(&self) -> ApiResult<EmployerApplicationFilter> {
        let job_id = match non_blank(self.job_id.clone()) {
            Some(raw) => Some(
                Uuid::parse_str(&raw).map_err(|_| ApiError::invalid_input("잘못된 공고 ID입니다"))?,
            ),
            None => None,
        };
        let status = match non_blank(self.status.clone()) {
            Some(raw) => Some(
                ApplicationStatus::parse(&raw)
                    .ok_or_else(|| ApiError::invalid_input("알 수 없는 지원 상태입니다"))?,
            ),
            None => None,
        };

        Ok(EmployerApplicationFilter { job_id, status })
    }
}

/// 지원서 목록 응답
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployerApplicationListResponse {
    pub applications: Vec<ApplicationResponse>,
    pub total: usize,
}

/// 지원 상태 변경 요청
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateApplicationStatusRequest {
    #[validate(required(message = "상태를 지정하세요"))]
    pub status: Option<ApplicationStatus>,
    /// 진행 단계. 생략하면 상태별 기본값
    #[validate(range(min = 1, max = 10))]
    pub step: Option<i32>,
    /// 지원자에게 보이는 메모
    #[validate(length(max = 2000))]
    pub message: Option<String>,
    pub next_interview_at: Option<DateTime<Utc>>,
}

impl UpdateApplicationStatusRequest {
    fn into_update(self) -> ApiResult<StatusUpdate> {
        let status = self
            .status
            .ok_or_else(|| ApiError::invalid_input("상태를 지정하세요"))?;
        if status == ApplicationStatus::Withdrawn {
            return Err(ApiError::invalid_input("철회는 지원자만 할 수 있습니다"));
        }

        Ok(StatusUpdate {
            status,
            step: self.step,
            message: non_blank(self.message),
            next_interview_at: self.next_interview_at,
        })
    }
}

fn not_found() -> ApiError {
    ApiError::not_found("지원서를 찾을 수 없습니다")
}

// ================================================================================================
// Handlers
// ================================================================================================

/// 내 공고에 들어온 지원서 목록 (최신 순)
#[utoipa::path(
    get,
    path = "/api/employer/applications",
    tag = "employer",
    params(EmployerApplicationsQuery),
    responses(
        (status = 200, description = "지원서 목록", body = EmployerApplicationListResponse),
        (status = 400, description = "잘못된 필터", body = ApiErrorResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "채용 담당자 전용", body = ApiErrorResponse)
    )
)]
pub async fn list_applications(
    EmployerAuth(claims): EmployerAuth,
    State(state): State<Arc<AppState>>,
    Query(query): Query<EmployerApplicationsQuery>,
) -> ApiResult<Json<EmployerApplicationListResponse>> {
    let filter = query.filter()?;
    let records =
        ApplicationRepository::list_for_employer(state.db()?, claims.user_id(), &filter).await?;
    let applications: Vec<ApplicationResponse> = records.into_iter().map(Into::into).collect();

    Ok(Json(EmployerApplicationListResponse {
        total: applications.len(),
        applications,
    }))
}

/// 지원서 조회
#[utoipa::path(
    get,
    path = "/api/employer/applications/{id}",
    tag = "employer",
    params(("id" = Uuid, Path, description = "지원서 ID")),
    responses(
        (status = 200, description = "지원서", body = ApplicationResponse),
        (status = 404, description = "없거나 내 공고의 지원서가 아님", body = ApiErrorResponse)
    )
)]
pub async fn get_application(
    EmployerAuth(claims): EmployerAuth,
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<Uuid>,
) -> ApiResult<Json<ApplicationResponse>> {
    let record = ApplicationRepository::find_for_employer(state.db()?, id, claims.user_id())
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(record.into()))
}

/// 지원 이력 (오래된 순)
#[utoipa::path(
    get,
    path = "/api/employer/applications/{id}/events",
    tag = "employer",
    params(("id" = Uuid, Path, description = "지원서 ID")),
    responses(
        (status = 200, description = "지원 이력", body = EventListResponse),
        (status = 404, description = "없거나 내 공고의 지원서가 아님", body = ApiErrorResponse)
    )
)]
pub async fn list_application_events(
    EmployerAuth(claims): EmployerAuth,
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<Uuid>,
) -> ApiResult<Json<EventListResponse>> {
    let pool = state.db()?;
    ApplicationRepository::find_for_employer(pool, id, claims.user_id())
        .await?
        .ok_or_else(not_found)?;

    let events = ApplicationRepository::list_events(pool, id).await?;
    Ok(Json(EventListResponse {
        events: events.into_iter().map(Into::into).collect(),
    }))
}

/// 지원 상태 변경
///
/// 종료된 지원서(철회/채용/불합격)나 같은 상태로의 변경은 409입니다.
#[utoipa::path(
    patch,
    path = "/api/employer/applications/{id}/status",
    tag = "employer",
    params(("id" = Uuid, Path, description = "지원서 ID")),
    request_body = UpdateApplicationStatusRequest,
    responses(
        (status = 200, description = "변경된 지원서", body = ApplicationResponse),
        (status = 400, description = "입력값 오류", body = ApiErrorResponse),
        (status = 404, description = "없거나 내 공고의 지원서가 아님", body = ApiErrorResponse),
        (status = 409, description = "허용되지 않는 상태 전이", body = ApiErrorResponse)
    )
)]
pub async fn update_application_status(
    EmployerAuth(claims): EmployerAuth,
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateApplicationStatusRequest>,
) -> ApiResult<Json<ApplicationResponse>> {
    let update = req.into_update()?;
    let pool = state.db()?;
    let employer_id = claims.user_id();

    match ApplicationRepository::update_status_by_employer(pool, id, employer_id, &update).await? {
        TransitionOutcome::Updated => {}
        TransitionOutcome::NotFound => return Err(not_found()),
        TransitionOutcome::Rejected(err) => return Err(err.into()),
    }

    info!(application_id = %id, status = update.status.as_str(), "Application status changed");
    record_application_status(update.status.as_str());

    let record = ApplicationRepository::find_for_employer(pool, id, employer_id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(record.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employer_cannot_withdraw() {
        let req = UpdateApplicationStatusRequest {
            status: Some(ApplicationStatus::Withdrawn),
            ..Default::default()
        };
        assert!(matches!(req.into_update(), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_into_update_keeps_fields() {
        let req: UpdateApplicationStatusRequest = serde_json::from_value(serde_json::json!({
            "status": "interview",
            "message": "  see you soon ",
            "nextInterviewAt": "2030-01-15T10:30:00Z"
        }))
        .unwrap();

        let update = req.into_update().unwrap();
        assert_eq!(update.status, ApplicationStatus::Interview);
        assert_eq!(update.step, None);
        assert_eq!(update.message.as_deref(), Some("see you soon"));
        assert!(update.next_interview_at.is_some());
    }

    #[test]
    fn test_query_filter() {
        let query = EmployerApplicationsQuery {
            job_id: Some("not-a-uuid".to_string()),
            status: None,
        };
        assert!(matches!(query.filter(), Err(ApiError::InvalidInput(_))));

        let query = EmployerApplicationsQuery {
            job_id: None,
            status: Some("offer".to_string()),
        };
        let filter = query.filter().unwrap();
        assert_eq!(filter.status, Some(ApplicationStatus::Offer));
        assert!(filter.job_id.is_none());
    }
}
