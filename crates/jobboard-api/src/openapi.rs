//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use jobboard_core::{
    ApplicationEventType, ApplicationStatus, AuthProvider, EmploymentType, JobStatus, Role,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiErrorResponse;
use crate::routes::{
    employer::{
        CandidateDetailResponse, CreateJobRequest, EmployerApplicationListResponse,
        EmployerJobListResponse, UpdateApplicationStatusRequest, UpdateJobRequest,
    },
    ApplicationListResponse, ApplyRequest, ComponentHealth, ComponentStatus, ContactRequest,
    EventListResponse, GoogleLoginRequest, HealthResponse, JobListResponse, LoginRequest,
    ProfileResponse, RecommendedJobsResponse, SavedJobListResponse, SignupRequest, SkillDto,
    UpdateProfileRequest, UserListResponse,
};
use crate::types::{
    ApplicationCandidate, ApplicationJob, ApplicationResponse, AuthResponse, EmployerJobResponse,
    EventResponse, JobDetail, JobSummary, SavedJobCard, SavedJobResponse, SuccessResponse,
    UserResponse,
};

// ==================== OpenAPI 문서 정의 ====================

/// Job Board API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Job Board API",
        description = r#"
# Job Board REST API

구직자와 채용 담당자를 위한 채용 게시판 API입니다.

## 인증

보호된 엔드포인트는 `Authorization: Bearer <token>` 헤더가 필요합니다.
토큰은 `/api/auth/signup`, `/api/auth/login`, `/api/auth/google`에서 발급되며 7일간 유효합니다.

- 토큰 없음/형식 오류/검증 실패: 401
- 역할 불일치: 403
- 다른 사용자의 리소스: 404
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "auth", description = "인증 - 가입, 로그인, 내 정보"),
        (name = "account", description = "계정 - 탈퇴"),
        (name = "jobs", description = "공고 - 목록, 추천, 상세, 지원, 저장"),
        (name = "saved-jobs", description = "관심 공고 - 구직자 북마크"),
        (name = "applications", description = "지원서 - 구직자 지원 내역과 철회"),
        (name = "profile", description = "프로필 - 구직자 프로필과 보유 기술"),
        (name = "employer", description = "채용 담당자 - 공고/지원서/지원자 관리"),
        (name = "contact", description = "문의 - 운영팀 메일"),
        (name = "admin", description = "관리자 - 사용자 목록")
    ),
    // ==================== 스키마 등록 ====================
    components(
        schemas(
            // ===== Common =====
            ApiErrorResponse,
            SuccessResponse,
            Role,
            AuthProvider,
            JobStatus,
            EmploymentType,
            ApplicationStatus,
            ApplicationEventType,

            // ===== Health =====
            HealthResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Auth =====
            SignupRequest,
            LoginRequest,
            GoogleLoginRequest,
            AuthResponse,
            UserResponse,

            // ===== Jobs =====
            JobSummary,
            JobDetail,
            JobListResponse,
            RecommendedJobsResponse,
            ApplyRequest,
            SavedJobResponse,
            SavedJobCard,
            SavedJobListResponse,

            // ===== Applications =====
            ApplicationResponse,
            ApplicationJob,
            ApplicationCandidate,
            ApplicationListResponse,
            EventResponse,
            EventListResponse,

            // ===== Profile =====
            ProfileResponse,
            SkillDto,
            UpdateProfileRequest,

            // ===== Employer =====
            CreateJobRequest,
            UpdateJobRequest,
            EmployerJobResponse,
            EmployerJobListResponse,
            EmployerApplicationListResponse,
            UpdateApplicationStatusRequest,
            CandidateDetailResponse,

            // ===== Contact / Admin =====
            ContactRequest,
            UserListResponse,
        )
    ),
    // ==================== 경로 등록 ====================
    paths(
        // ===== Health =====
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        // ===== Auth =====
        crate::routes::auth::signup,
        crate::routes::auth::login,
        crate::routes::auth::google_login,
        crate::routes::auth::me,
        crate::routes::account::delete_account,

        // ===== Jobs =====
        crate::routes::jobs::list_jobs,
        crate::routes::jobs::recommended_jobs,
        crate::routes::jobs::get_job,
        crate::routes::jobs::apply_to_job,
        crate::routes::jobs::save_job,

        // ===== Candidate =====
        crate::routes::saved_jobs::list_saved_jobs,
        crate::routes::saved_jobs::get_saved_job,
        crate::routes::saved_jobs::delete_saved_job,
        crate::routes::applications::list_applications,
        crate::routes::applications::get_application,
        crate::routes::applications::list_application_events,
        crate::routes::applications::withdraw_application,
        crate::routes::profile::get_profile,
        crate::routes::profile::update_profile,

        // ===== Employer =====
        crate::routes::employer::jobs::list_jobs,
        crate::routes::employer::jobs::create_job,
        crate::routes::employer::jobs::get_job,
        crate::routes::employer::jobs::update_job,
        crate::routes::employer::applications::list_applications,
        crate::routes::employer::applications::get_application,
        crate::routes::employer::applications::list_application_events,
        crate::routes::employer::applications::update_application_status,
        crate::routes::employer::candidates::get_candidate,

        // ===== Contact / Admin =====
        crate::routes::contact::send_contact,
        crate::routes::admin::list_users,
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
///
/// 다음 경로에 문서 UI를 마운트합니다:
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

// ==================== 테스트 ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        assert!(json.contains("Job Board API"));

        assert!(json.contains("/health/ready"));
        assert!(json.contains("/api/auth/login"));
        assert!(json.contains("/api/jobs/recommended"));
        assert!(json.contains("/api/applications/{id}/withdraw"));
        assert!(json.contains("/api/employer/applications/{id}/status"));
        assert!(json.contains("/api/saved-jobs/{id}"));
    }

    #[test]
    fn test_swagger_ui_router_creates() {
        let _router: Router<()> = swagger_ui_router();
    }

    #[test]
    fn test_openapi_contains_schemas() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string(&spec).unwrap();

        assert!(json.contains("ApiErrorResponse"));
        assert!(json.contains("JobDetail"));
        assert!(json.contains("ApplicationResponse"));
        assert!(json.contains("UpdateApplicationStatusRequest"));
    }
}
