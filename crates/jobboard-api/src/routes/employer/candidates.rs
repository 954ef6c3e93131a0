//! 채용 담당자의 지원자 조회
//!
//! 내 공고에 지원한 적이 있는 구직자만 볼 수 있습니다.

use axum::{
    extract::State,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::EmployerAuth;
use crate::error::{ApiError, ApiErrorResponse, ApiResult};
use crate::repository::{ApplicationRepository, ProfileRepository, UserRepository};
use crate::routes::profile::ProfileResponse;
use crate::state::AppState;
use crate::types::{ApplicationCandidate, ApplicationResponse};
use crate::utils::{or_empty, IdPath};

/// 지원자 상세 응답
#[derive(Debug, Serialize, ToSchema)]
pub struct CandidateDetailResponse {
    pub candidate: ApplicationCandidate,
    pub profile: ProfileResponse,
    /// 내 공고에 낸 지원서
    pub applications: Vec<ApplicationResponse>,
}

/// 지원자 상세
#[utoipa::path(
    get,
    path = "/api/employer/candidates/{id}",
    tag = "employer",
    params(("id" = Uuid, Path, description = "구직자 ID")),
    responses(
        (status = 200, description = "지원자 프로필과 지원 내역", body = CandidateDetailResponse),
        (status = 404, description = "내 공고에 지원한 적 없음", body = ApiErrorResponse)
    )
)]
pub async fn get_candidate(
    EmployerAuth(claims): EmployerAuth,
    State(state): State<Arc<AppState>>,
    IdPath(candidate_id): IdPath<Uuid>,
) -> ApiResult<Json<CandidateDetailResponse>> {
    let pool = state.db()?;
    let not_found = || ApiError::not_found("지원자를 찾을 수 없습니다");

    let applications =
        ApplicationRepository::list_for_candidate_and_employer(pool, candidate_id, claims.user_id())
            .await?;
    if applications.is_empty() {
        return Err(not_found());
    }

    let user = UserRepository::find_by_id(pool, candidate_id)
        .await?
        .ok_or_else(not_found)?;
    let profile = ProfileRepository::find(pool, candidate_id).await?;
    let skills = ProfileRepository::list_skills(pool, candidate_id).await?;

    Ok(Json(CandidateDetailResponse {
        candidate: ApplicationCandidate {
            id: user.id,
            name: or_empty(user.name),
            email: user.email,
        },
        profile: ProfileResponse::new(profile, skills),
        applications: applications.into_iter().map(Into::into).collect(),
    }))
}
