//! 사용자 응답 타입.

use jobboard_core::{AuthProvider, Role};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repository::UserRecord;
use crate::utils::{format_timestamp, or_empty};

/// 사용자 정보 (비밀번호 해시 제외)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub provider: AuthProvider,
    /// 채용 담당자만 값이 있음
    pub company_name: Option<String>,
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        let role = record.role();
        let provider = record.provider();
        Self {
            id: record.id,
            name: or_empty(record.name),
            email: record.email,
            role,
            provider,
            company_name: record.company_name,
            created_at: format_timestamp(&record.created_at),
        }
    }
}

/// 로그인/가입 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
    /// Google 로그인에서 새 계정이 만들어졌는지 여부
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<bool>,
}
