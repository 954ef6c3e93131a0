//! Saved Job Repository
//!
//! 구직자의 관심 공고(북마크)를 관리합니다.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// 관심 공고 레코드 (공고 요약 포함)
#[derive(Debug, Clone, FromRow)]
pub struct SavedJobRecord {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub job_title: String,
    pub job_slug: String,
    pub job_location: Option<String>,
    pub job_remote: bool,
    pub job_employment_type: String,
    pub job_status: String,
    pub job_published_at: Option<DateTime<Utc>>,
    pub company_name: Option<String>,
}

const SAVED_JOB_SELECT: &str = r#"
    SELECT s.*,
           j.title AS job_title,
           j.slug AS job_slug,
           j.location AS job_location,
           j.remote AS job_remote,
           j.employment_type AS job_employment_type,
           j.status AS job_status,
           j.published_at AS job_published_at,
           u.company_name
    FROM saved_jobs s
    JOIN jobs j ON j.id = s.job_id
    JOIN users u ON u.id = j.employer_id
"#;

/// Saved Job Repository
pub struct SavedJobRepository;

impl SavedJobRepository {
    /// 관심 공고 추가. 중복 저장은 unique 제약 위반 에러.
    pub async fn create(pool: &PgPool, candidate_id: Uuid, job_id: Uuid) -> Result<Uuid, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO saved_jobs (candidate_id, job_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(candidate_id)
        .bind(job_id)
        .fetch_one(pool)
        .await
    }

    /// 저장 여부
    pub async fn exists(pool: &PgPool, candidate_id: Uuid, job_id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM saved_jobs WHERE candidate_id = $1 AND job_id = $2)",
        )
        .bind(candidate_id)
        .bind(job_id)
        .fetch_one(pool)
        .await
    }

    /// 구직자의 관심 공고 목록, 최신 저장 순
    pub async fn list_for_candidate(
        pool: &PgPool,
        candidate_id: Uuid,
    ) -> Result<Vec<SavedJobRecord>, sqlx::Error> {
        sqlx::query_as::<_, SavedJobRecord>(&format!(
            "{} WHERE s.candidate_id = $1 ORDER BY s.created_at DESC",
            SAVED_JOB_SELECT
        ))
        .bind(candidate_id)
        .fetch_all(pool)
        .await
    }

    /// 구직자 소유 관심 공고 조회
    pub async fn find_for_candidate(
        pool: &PgPool,
        id: Uuid,
        candidate_id: Uuid,
    ) -> Result<Option<SavedJobRecord>, sqlx::Error> {
        sqlx::query_as::<_, SavedJobRecord>(&format!(
            "{} WHERE s.id = $1 AND s.candidate_id = $2",
            SAVED_JOB_SELECT
        ))
        .bind(id)
        .bind(candidate_id)
        .fetch_optional(pool)
        .await
    }

    /// 관심 공고 삭제. 다른 구직자의 행은 건드리지 않습니다.
    pub async fn delete_for_candidate(
        pool: &PgPool,
        id: Uuid,
        candidate_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM saved_jobs WHERE id = $1 AND candidate_id = $2")
            .bind(id)
            .bind(candidate_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
