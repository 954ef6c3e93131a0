//! 공용 응답 타입 정의.
//!
//! DB 레코드를 API 응답으로 바꾸는 매핑 계층입니다. JSON 키는 camelCase,
//! 시각은 RFC3339 문자열이며 표시용 문자열의 `NULL`은 여기서 센티널 값으로 바뀝니다.

mod application;
mod job;
mod user;

pub use application::{ApplicationCandidate, ApplicationJob, ApplicationResponse, EventResponse};
pub use job::{EmployerJobResponse, JobDetail, JobSummary, SavedJobCard, SavedJobResponse};
pub use user::{AuthResponse, UserResponse};

use serde::Serialize;
use utoipa::ToSchema;

/// 단순 성공 응답
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
