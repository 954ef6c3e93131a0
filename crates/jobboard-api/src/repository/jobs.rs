//! Job Repository
//!
//! 채용공고 조회/생성/상태 변경을 담당합니다. 모든 조회는 회사명을 위해
//! 작성자(users) 테이블과 조인합니다.

use chrono::{DateTime, Utc};
use jobboard_core::{job_slug, EmploymentType, JobStatus, Pagination};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

// ================================================================================================
// Types
// ================================================================================================

/// 채용공고 레코드 (회사명 포함)
#[derive(Debug, Clone, FromRow)]
pub struct JobRecord {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub remote: bool,
    pub employment_type: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub salary_currency: Option<String>,
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub company_name: Option<String>,
}

impl JobRecord {
    pub fn status(&self) -> Option<JobStatus> {
        JobStatus::parse(&self.status)
    }
}

/// 채용공고 + 지원자 수 (기업 화면용)
#[derive(Debug, Clone, FromRow)]
pub struct EmployerJobRecord {
    #[sqlx(flatten)]
    pub job: JobRecord,
    pub application_count: i64,
}

/// 공개 목록 필터
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// 제목/설명 검색어
    pub q: Option<String>,
    pub location: Option<String>,
    pub remote: Option<bool>,
    pub employment_type: Option<EmploymentType>,
}

/// 새 채용공고 입력
#[derive(Debug, Clone)]
pub struct NewJob {
    pub employer_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub remote: bool,
    pub employment_type: EmploymentType,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub salary_currency: Option<String>,
    pub status: JobStatus,
}

/// ILIKE 패턴 생성. 사용자 입력의 와일드카드는 이스케이프합니다.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

const JOB_SELECT: &str = r#"
    SELECT j.*, u.company_name
    FROM jobs j
    JOIN users u ON u.id = j.employer_id
"#;

// ================================================================================================
// Repository
// ================================================================================================

/// Job Repository
pub struct JobRepository;

impl JobRepository {
    /// 게시된 공고 목록 (필터 + 페이지네이션), 최신 게시 순
    pub async fn list_published(
        pool: &PgPool,
        filter: &JobFilter,
        page: Pagination,
    ) -> Result<(Vec<JobRecord>, i64), sqlx::Error> {
        let q = filter.q.as_deref().map(like_pattern);
        let location = filter.location.as_deref().map(like_pattern);
        let employment_type = filter.employment_type.map(|t| t.as_str());

        let where_clause = r#"
            WHERE j.status = 'published'
              AND ($1::TEXT IS NULL OR j.title ILIKE $1 OR j.description ILIKE $1)
              AND ($2::TEXT IS NULL OR j.location ILIKE $2)
              AND ($3::BOOLEAN IS NULL OR j.remote = $3)
              AND ($4::TEXT IS NULL OR j.employment_type = $4)
        "#;

        let jobs = sqlx::query_as::<_, JobRecord>(&format!(
            "{} {} ORDER BY j.published_at DESC NULLS LAST, j.created_at DESC LIMIT $5 OFFSET $6",
            JOB_SELECT, where_clause
        ))
        .bind(&q)
        .bind(&location)
        .bind(filter.remote)
        .bind(employment_type)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM jobs j {}",
            where_clause
        ))
        .bind(&q)
        .bind(&location)
        .bind(filter.remote)
        .bind(employment_type)
        .fetch_one(pool)
        .await?;

        Ok((jobs, total))
    }

    /// 추천 공고
    ///
    /// 마감 공고 제외. `published_at`이 있는 공고를 게시 최신순으로 먼저,
    /// 나머지는 생성 최신순으로 이어 붙입니다.
    pub async fn recommended(pool: &PgPool, limit: i64) -> Result<Vec<JobRecord>, sqlx::Error> {
        sqlx::query_as::<_, JobRecord>(&format!(
            r#"{}
            WHERE j.status <> 'closed'
            ORDER BY (j.published_at IS NULL) ASC, j.published_at DESC, j.created_at DESC
            LIMIT $1"#,
            JOB_SELECT
        ))
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// ID로 조회
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<JobRecord>, sqlx::Error> {
        sqlx::query_as::<_, JobRecord>(&format!("{} WHERE j.id = $1", JOB_SELECT))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// 슬러그로 조회
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<JobRecord>, sqlx::Error> {
        sqlx::query_as::<_, JobRecord>(&format!("{} WHERE j.slug = $1", JOB_SELECT))
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// UUID 형식이면 ID로, 아니면 슬러그로 조회
    pub async fn find_by_id_or_slug(
        pool: &PgPool,
        key: &str,
    ) -> Result<Option<JobRecord>, sqlx::Error> {
        match Uuid::parse_str(key) {
            Ok(id) => Self::find_by_id(pool, id).await,
            Err(_) => Self::find_by_slug(pool, key).await,
        }
    }

    /// 공고 생성
    ///
    /// 슬러그는 제목 + ID 앞 8자리. 게시 상태로 생성하면 `published_at`을 찍습니다.
    pub async fn create(pool: &PgPool, input: NewJob) -> Result<JobRecord, sqlx::Error> {
        let id = Uuid::new_v4();
        let slug = job_slug(&input.title, id);

        sqlx::query_as::<_, JobRecord>(
            r#"
            WITH inserted AS (
                INSERT INTO jobs (
                    id, employer_id, slug, title, description, location, remote,
                    employment_type, salary_min, salary_max, salary_currency, status, published_at
                )
                VALUES (
                    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                    CASE WHEN $12 = 'published' THEN NOW() ELSE NULL END
                )
                RETURNING *
            )
            SELECT inserted.*, u.company_name
            FROM inserted
            JOIN users u ON u.id = inserted.employer_id
            "#,
        )
        .bind(id)
        .bind(input.employer_id)
        .bind(&slug)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.location)
        .bind(input.remote)
        .bind(input.employment_type.as_str())
        .bind(input.salary_min)
        .bind(input.salary_max)
        .bind(&input.salary_currency)
        .bind(input.status.as_str())
        .fetch_one(pool)
        .await
    }

    /// 기업의 공고 목록 (지원자 수 포함), 최신 생성 순
    pub async fn list_by_employer(
        pool: &PgPool,
        employer_id: Uuid,
    ) -> Result<Vec<EmployerJobRecord>, sqlx::Error> {
        sqlx::query_as::<_, EmployerJobRecord>(
            r#"
            SELECT j.*, u.company_name, COUNT(a.id) AS application_count
            FROM jobs j
            JOIN users u ON u.id = j.employer_id
            LEFT JOIN applications a ON a.job_id = j.id
            WHERE j.employer_id = $1
            GROUP BY j.id, u.company_name
            ORDER BY j.created_at DESC
            "#,
        )
        .bind(employer_id)
        .fetch_all(pool)
        .await
    }

    /// 기업 소유 공고 조회. 소유하지 않으면 `None`.
    pub async fn find_for_employer(
        pool: &PgPool,
        id: Uuid,
        employer_id: Uuid,
    ) -> Result<Option<EmployerJobRecord>, sqlx::Error> {
        sqlx::query_as::<_, EmployerJobRecord>(
            r#"
            SELECT j.*, u.company_name, COUNT(a.id) AS application_count
            FROM jobs j
            JOIN users u ON u.id = j.employer_id
            LEFT JOIN applications a ON a.job_id = j.id
            WHERE j.id = $1 AND j.employer_id = $2
            GROUP BY j.id, u.company_name
            "#,
        )
        .bind(id)
        .bind(employer_id)
        .fetch_optional(pool)
        .await
    }

    /// 공고 상태 변경. 처음 게시될 때만 `published_at`을 찍습니다.
    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        employer_id: Uuid,
        status: JobStatus,
    ) -> Result<Option<JobRecord>, sqlx::Error> {
        sqlx::query_as::<_, JobRecord>(
            r#"
            WITH updated AS (
                UPDATE jobs
                SET status = $3,
                    published_at = CASE
                        WHEN $3 = 'published' THEN COALESCE(published_at, NOW())
                        ELSE published_at
                    END,
                    updated_at = NOW()
                WHERE id = $1 AND employer_id = $2
                RETURNING *
            )
            SELECT updated.*, u.company_name
            FROM updated
            JOIN users u ON u.id = updated.employer_id
            "#,
        )
        .bind(id)
        .bind(employer_id)
        .bind(status.as_str())
        .fetch_optional(pool)
        .await
    }
}
