//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/auth` - 가입, 로그인, Google 로그인, 내 정보
//! - `/api/account` - 계정 삭제
//! - `/api/jobs` - 공개 공고 목록/상세, 지원, 관심 공고 저장
//! - `/api/saved-jobs` - 관심 공고 (구직자)
//! - `/api/applications` - 내 지원서 (구직자)
//! - `/api/profile` - 구직자 프로필
//! - `/api/employer` - 공고/지원서/지원자 관리 (채용 담당자)
//! - `/api/contact` - 문의 메일
//! - `/api/admin` - 사용자 목록 (관리자)

pub mod account;
pub mod admin;
pub mod applications;
pub mod auth;
pub mod contact;
pub mod employer;
pub mod health;
pub mod jobs;
pub mod profile;
pub mod saved_jobs;

pub use account::account_router;
pub use admin::{admin_router, UserListResponse};
pub use applications::{applications_router, ApplicationListResponse, EventListResponse};
pub use auth::{auth_router, GoogleLoginRequest, LoginRequest, SignupRequest};
pub use contact::{contact_router, ContactRequest};
pub use employer::employer_router;
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use jobs::{jobs_router, ApplyRequest, JobListResponse, RecommendedJobsResponse};
pub use profile::{profile_router, ProfileResponse, SkillDto, UpdateProfileRequest};
pub use saved_jobs::{saved_jobs_router, SavedJobListResponse};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // API 엔드포인트
        .nest("/api/auth", auth_router())
        .nest("/api/account", account_router())
        .nest("/api/jobs", jobs_router())
        .nest("/api/saved-jobs", saved_jobs_router())
        .nest("/api/applications", applications_router())
        .nest("/api/profile", profile_router())
        .nest("/api/employer", employer_router())
        .nest("/api/contact", contact_router())
        .nest("/api/admin", admin_router())
}
