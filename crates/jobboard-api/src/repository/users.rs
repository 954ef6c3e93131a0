//! User Repository
//!
//! 사용자 계정 관련 데이터베이스 연산을 담당합니다.

use chrono::{DateTime, Utc};
use jobboard_core::{AuthProvider, Pagination, Role};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

// ================================================================================================
// Types
// ================================================================================================

/// 사용자 레코드
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: String,
    pub auth_provider: String,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// 역할 파싱. CHECK 제약으로 항상 유효하지만, 알 수 없는 값은 구직자로 취급합니다.
    pub fn role(&self) -> Role {
        Role::parse(&self.role).unwrap_or(Role::Candidate)
    }

    pub fn provider(&self) -> AuthProvider {
        AuthProvider::parse(&self.auth_provider).unwrap_or(AuthProvider::Credentials)
    }
}

/// 새 사용자 입력
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: Role,
    pub auth_provider: AuthProvider,
    pub company_name: Option<String>,
}

// ================================================================================================
// Repository
// ================================================================================================

/// User Repository
pub struct UserRepository;

impl UserRepository {
    /// ID로 조회
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// 이메일로 조회 (역할 무관)
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// 이메일 + 역할로 조회 (로그인용)
    pub async fn find_by_email_and_role(
        pool: &PgPool,
        email: &str,
        role: Role,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE email = $1 AND role = $2")
            .bind(email)
            .bind(role.as_str())
            .fetch_optional(pool)
            .await
    }

    /// 사용자 생성
    ///
    /// 이메일 중복 시 unique 제약 위반 에러를 그대로 반환합니다.
    pub async fn create(pool: &PgPool, input: NewUser) -> Result<UserRecord, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (name, email, password_hash, role, auth_provider, company_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(input.role.as_str())
        .bind(input.auth_provider.as_str())
        .bind(&input.company_name)
        .fetch_one(pool)
        .await
    }

    /// 사용자 삭제 (연관 행은 FK CASCADE로 삭제됨)
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 사용자 목록 (관리자용), 최신 가입 순
    pub async fn list(
        pool: &PgPool,
        role: Option<Role>,
        page: Pagination,
    ) -> Result<(Vec<UserRecord>, i64), sqlx::Error> {
        let role = role.map(|r| r.as_str());

        let users = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT * FROM users
            WHERE ($1::TEXT IS NULL OR role = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(role)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE ($1::TEXT IS NULL OR role = $1)")
                .bind(role)
                .fetch_one(pool)
                .await?;

        Ok((users, total))
    }
}
