//! 채용 담당자 API 라우트
//!
//! 모든 엔드포인트는 employer 토큰이 필요하며, 다른 기업의 공고/지원서는 404로 보입니다.
//!
//! - `/api/employer/jobs` - 내 공고 관리
//! - `/api/employer/applications` - 내 공고에 들어온 지원서
//! - `/api/employer/candidates/{id}` - 지원자 프로필

pub mod applications;
pub mod candidates;
pub mod jobs;

pub use applications::{EmployerApplicationListResponse, UpdateApplicationStatusRequest};
pub use candidates::CandidateDetailResponse;
pub use jobs::{CreateJobRequest, EmployerJobListResponse, UpdateJobRequest};

use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;

use crate::state::AppState;

/// 채용 담당자 라우터 생성.
pub fn employer_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/jobs/{id}", get(jobs::get_job).patch(jobs::update_job))
        .route("/applications", get(applications::list_applications))
        .route("/applications/{id}", get(applications::get_application))
        .route(
            "/applications/{id}/events",
            get(applications::list_application_events),
        )
        .route(
            "/applications/{id}/status",
            patch(applications::update_application_status),
        )
        .route("/candidates/{id}", get(candidates::get_candidate))
}
